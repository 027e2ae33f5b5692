use crate::error::{PropertyError, Result};
use crate::models::{NewProperty, Property, PropertyInput, ValidationErrors};
use crate::store::types::PropertyFilter;
use async_trait::async_trait;
use uuid::Uuid;

/// Common trait for all property record stores.
///
/// Backends implement the primitive operations on already validated data;
/// `create`, `update` and `insert_many` validate payloads before reaching
/// them, so no backend ever persists a document that breaks the schema.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Insert a new document, assigning id and timestamps
    async fn insert(&self, data: NewProperty) -> Result<Property>;

    /// Insert every document or none of them
    async fn insert_all(&self, data: Vec<NewProperty>) -> Result<Vec<Property>>;

    /// Fetch by id; malformed ids are reported as not found
    async fn get_by_id(&self, id: &str) -> Result<Property>;

    /// Matching documents, newest created first
    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>>;

    /// Replace the document's fields, keeping id and creation time
    async fn replace(&self, id: &str, data: NewProperty) -> Result<Property>;

    /// Remove a document, returning what was removed
    async fn delete(&self, id: &str) -> Result<Property>;

    /// Remove every document, returning how many were removed
    async fn clear(&self) -> Result<usize>;

    /// Get the name of the storage backend
    fn backend_name(&self) -> &'static str;

    async fn create(&self, input: &PropertyInput) -> Result<Property> {
        let data = input.validate()?;
        self.insert(data).await
    }

    async fn update(&self, id: &str, input: &PropertyInput) -> Result<Property> {
        let data = input.validate()?;
        self.replace(id, data).await
    }

    async fn insert_many(&self, inputs: &[PropertyInput]) -> Result<Vec<Property>> {
        let data = inputs
            .iter()
            .map(PropertyInput::validate)
            .collect::<std::result::Result<Vec<_>, ValidationErrors>>()?;
        self.insert_all(data).await
    }
}

/// Parse a document id, mapping anything malformed to not found
pub fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| PropertyError::NotFound)
}
