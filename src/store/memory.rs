//! In-memory store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{PropertyError, Result};
use crate::models::{NewProperty, Property};
use crate::store::traits::{parse_id, PropertyStore};
use crate::store::types::PropertyFilter;

#[derive(Debug, Default)]
struct Documents {
    by_id: HashMap<Uuid, (u64, Property)>,
    next_seq: u64,
}

impl Documents {
    fn insert(&mut self, data: NewProperty) -> Property {
        let property = Property::from_new(Uuid::new_v4(), data, Utc::now());
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_id.insert(property.id, (seq, property.clone()));
        property
    }
}

/// In-memory store, used by tests and the `memory://` connection string.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn insert(&self, data: NewProperty) -> Result<Property> {
        Ok(self.documents.write().insert(data))
    }

    async fn insert_all(&self, data: Vec<NewProperty>) -> Result<Vec<Property>> {
        let mut documents = self.documents.write();
        Ok(data.into_iter().map(|d| documents.insert(d)).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Property> {
        let id = parse_id(id)?;
        self.documents
            .read()
            .by_id
            .get(&id)
            .map(|(_, p)| p.clone())
            .ok_or(PropertyError::NotFound)
    }

    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        let documents = self.documents.read();
        let mut matching: Vec<&(u64, Property)> = documents
            .by_id
            .values()
            .filter(|(_, p)| filter.matches(p))
            .collect();

        // Insertion order breaks ties between equal creation times.
        matching.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b_seq.cmp(a_seq))
        });

        Ok(matching.into_iter().map(|(_, p)| p.clone()).collect())
    }

    async fn replace(&self, id: &str, data: NewProperty) -> Result<Property> {
        let id = parse_id(id)?;
        let mut documents = self.documents.write();
        let (_, property) = documents
            .by_id
            .get_mut(&id)
            .ok_or(PropertyError::NotFound)?;
        property.replace(data, Utc::now());
        Ok(property.clone())
    }

    async fn delete(&self, id: &str) -> Result<Property> {
        let id = parse_id(id)?;
        self.documents
            .write()
            .by_id
            .remove(&id)
            .map(|(_, p)| p)
            .ok_or(PropertyError::NotFound)
    }

    async fn clear(&self) -> Result<usize> {
        let mut documents = self.documents.write();
        let removed = documents.by_id.len();
        documents.by_id.clear();
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
