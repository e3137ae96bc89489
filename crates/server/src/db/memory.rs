//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use macprice_core::{Document, Filter, ID_FIELD};

use super::{DocumentStore, StorageError};

/// Process-local document store.
///
/// Documents are kept per collection in insertion order. Nothing survives a
/// restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn put(&self, collection: &str, mut document: Document) -> Result<(), StorageError> {
        document.insert(
            ID_FIELD.to_owned(),
            Value::String(Uuid::new_v4().to_string()),
        );
        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn collections(&self) -> Result<Vec<String>, StorageError> {
        let collections = self.collections.read().await;
        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
