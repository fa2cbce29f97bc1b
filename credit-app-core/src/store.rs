//! Document store contract and the in-memory store.
//!
//! The store is document-oriented and keyed by document id. Lookups go
//! through an indexed field; writes are partial merges.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

/// Store failures, surfaced to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// One stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

/// Remote document store, as consumed by the account gateway.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection` whose `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;

    /// Merge `fields` into an existing document. Fields not listed are
    /// left as stored.
    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError>;
}

type Collection = HashMap<String, Map<String, Value>>;

/// Process-local store backed by a lock-guarded map. Lookups return
/// documents in id order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a whole document.
    pub async fn insert(&self, collection: &str, id: &str, fields: Map<String, Value>) {
        let mut guard = self.collections.write().await;
        guard
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), fields);
    }

    /// Snapshot of one document.
    pub async fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let guard = self.collections.read().await;
        guard
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|fields| Document {
                id: id.to_owned(),
                fields: fields.clone(),
            })
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(collection) else {
            return Ok(Vec::new());
        };
        let mut hits: Vec<Document> = docs
            .iter()
            .filter(|(_, fields)| fields.get(field) == Some(value))
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect();
        hits.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(hits)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut guard = self.collections.write().await;
        let doc = guard
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })?;
        for (key, value) in fields {
            doc.insert(key, value);
        }
        Ok(())
    }
}
