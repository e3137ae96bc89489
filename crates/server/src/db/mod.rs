//! Document access over a pluggable store.
//!
//! The access layer is deliberately untyped: it moves plain [`Document`]s in
//! and out of named collections and leaves all field rules to
//! `macprice_core::schema`. The same two operations serve all four record
//! types.
//!
//! # Stores
//!
//! - [`PgDocumentStore`] - `PostgreSQL` JSONB table (`documents`)
//! - [`MemoryStore`] - process-local, used by tests and `MACPRICE_STORE=memory`
//!
//! # Migrations
//!
//! The `documents` table is created by `crates/server/migrations/`, run via:
//! ```bash
//! cargo run -p macprice-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

use macprice_core::{Document, Filter, Record};

use crate::config::{DatabaseConfig, StoreBackend};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Maximum number of collection names reported by [`Database::collections`].
const MAX_LISTED_COLLECTIONS: usize = 10;

/// Boxed source error from a store implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from document access operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No store handle was established at startup.
    #[error("document store is not available")]
    Unavailable,

    /// The store rejected a write.
    #[error("failed to write to collection '{collection}': {source}")]
    Write {
        collection: String,
        #[source]
        source: BoxError,
    },

    /// The store rejected a read.
    #[error("failed to read from collection '{collection}': {source}")]
    Read {
        collection: String,
        #[source]
        source: BoxError,
    },
}

impl StorageError {
    /// Wrap a store failure during a write to `collection`.
    pub fn write(collection: &str, source: impl Into<BoxError>) -> Self {
        Self::Write {
            collection: collection.to_owned(),
            source: source.into(),
        }
    }

    /// Wrap a store failure during a read from `collection`.
    pub fn read(collection: &str, source: impl Into<BoxError>) -> Self {
        Self::Read {
            collection: collection.to_owned(),
            source: source.into(),
        }
    }
}

/// A schemaless store of documents grouped into named collections.
///
/// Implementations assign every stored document an identifier in
/// [`macprice_core::ID_FIELD`] and return it with query results. They do not
/// validate, deduplicate, or order concurrent writes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Append `document` to `collection`, creating the collection if needed.
    async fn put(&self, collection: &str, document: Document) -> Result<(), StorageError>;

    /// Return every document in `collection` matching `filter`, in write order.
    ///
    /// A collection that does not exist yields an empty result.
    async fn query(&self, collection: &str, filter: &Filter)
    -> Result<Vec<Document>, StorageError>;

    /// Names of collections holding at least one document, sorted.
    async fn collections(&self) -> Result<Vec<String>, StorageError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Handle to the document store shared by all requests.
///
/// Cheap to clone. A handle built without a store reports
/// [`StorageError::Unavailable`] from every operation instead of failing at
/// startup.
#[derive(Clone, Default)]
pub struct Database {
    store: Option<Arc<dyn DocumentStore>>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("available", &self.is_available())
            .finish()
    }
}

impl Database {
    /// Create a handle backed by `store`.
    #[must_use]
    pub fn new(store: impl DocumentStore + 'static) -> Self {
        Self {
            store: Some(Arc::new(store)),
        }
    }

    /// Create a handle with no store behind it.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self { store: None }
    }

    /// Establish the store described by `config`.
    ///
    /// Never fails: missing settings or an unreachable database are logged
    /// and produce an unavailable handle.
    pub async fn connect(config: &DatabaseConfig) -> Self {
        match config.backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory document store");
                Self::new(MemoryStore::new())
            }
            StoreBackend::Postgres => {
                let (Some(url), Some(name)) = (&config.url, &config.name) else {
                    tracing::warn!(
                        "DATABASE_URL or DATABASE_NAME not set, document store unavailable"
                    );
                    return Self::unavailable();
                };

                match PgDocumentStore::connect(url, name).await {
                    Ok(store) => {
                        tracing::info!(database = %name, "Connected to document store");
                        Self::new(store)
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            database = %name,
                            "Failed to connect to document store, continuing without it"
                        );
                        Self::unavailable()
                    }
                }
            }
        }
    }

    /// Returns true if a store handle was established.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&dyn DocumentStore, StorageError> {
        self.store.as_deref().ok_or(StorageError::Unavailable)
    }

    /// Serialize `record` and append it to `collection`.
    ///
    /// No uniqueness check is made: writing the same record twice stores two
    /// documents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if there is no store handle.
    /// Returns `StorageError::Write` if the store rejects the write.
    #[instrument(skip(self, record))]
    pub async fn create_document<R: Record>(
        &self,
        collection: &str,
        record: &R,
    ) -> Result<(), StorageError> {
        let store = self.store()?;
        store.put(collection, record.to_document()).await?;
        tracing::debug!("Document created");
        Ok(())
    }

    /// Fetch every document in `collection` matching `filter`.
    ///
    /// An empty filter returns the whole collection. A missing collection or
    /// no matches returns an empty vector.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if there is no store handle.
    /// Returns `StorageError::Read` if the store rejects the query.
    #[instrument(skip(self))]
    pub async fn get_documents(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        let documents = self.store()?.query(collection, filter).await?;
        tracing::debug!(count = documents.len(), "Documents fetched");
        Ok(documents)
    }

    /// Names of up to ten non-empty collections.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if there is no store handle, or
    /// the store's read error.
    pub async fn collections(&self) -> Result<Vec<String>, StorageError> {
        let mut names = self.store()?.collections().await?;
        names.truncate(MAX_LISTED_COLLECTIONS);
        Ok(names)
    }

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if there is no store handle, or
    /// the store's error if it does not answer.
    pub async fn ping(&self) -> Result<(), StorageError> {
        self.store()?.ping().await
    }
}
