pub mod db;
pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;

use std::sync::Arc;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::PropertyStore;
pub use types::PropertyFilter;

use crate::error::Result;
use tracing::info;

/// Connection string selecting the in-memory backend
pub const MEMORY_URL: &str = "memory://";

/// Open the store named by a connection string.
///
/// `memory://` selects the in-memory backend; `sqlite://<path>` or a bare
/// path opens (and migrates) a SQLite database.
pub fn connect(database_url: &str) -> Result<Arc<dyn PropertyStore>> {
    if database_url == MEMORY_URL {
        info!("Using in-memory property store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let path = database_url
        .strip_prefix("sqlite://")
        .unwrap_or(database_url);
    let pool = db::create_pool(path)?;
    db::run_migrations(&pool)?;
    info!(path, "SQLite property store connected");

    Ok(Arc::new(SqliteStore::new(pool)))
}
