//! Database layer for the SQLite backend using Diesel ORM.

pub mod model;
pub mod schema;

use std::time::Duration;

use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::{QueryResult, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{PropertyError, Result};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database connection pool type alias.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Milliseconds a writer waits on a locked database before giving up.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Applies [`configure_sqlite_connection`] to every pooled connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn).map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Configure SQLite connection pragmas so concurrent writers queue up
/// instead of failing with `database is locked`.
///
/// WAL is a no-op for `:memory:` databases.
pub fn configure_sqlite_connection(conn: &mut SqliteConnection) -> QueryResult<()> {
    diesel::sql_query(format!("PRAGMA busy_timeout={BUSY_TIMEOUT_MS}")).execute(conn)?;
    diesel::sql_query("PRAGMA journal_mode=WAL").execute(conn)?;
    Ok(())
}

/// Create a connection pool for the given database path.
///
/// An in-memory database lives inside a single connection, so the pool is
/// capped at one connection for `:memory:`.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let max_size = if database_path == ":memory:" { 1 } else { 5 };
    let manager = ConnectionManager::<SqliteConnection>::new(database_path);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(5))
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| PropertyError::Connection(e.to_string()))
}

/// Apply any pending schema migrations.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool
        .get()
        .map_err(|e| PropertyError::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PropertyError::Database(e.to_string()))?;
    tracing::debug!(count = applied.len(), "applied migrations");
    Ok(())
}
