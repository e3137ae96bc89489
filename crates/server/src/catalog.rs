//! Typed catalogue operations over the document store.
//!
//! This is where the two layers meet: inbound data is validated before it is
//! written, and stored documents are validated again before they are handed
//! out, with the store's identifier stripped first.

use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use macprice_core::{Filter, ID_FIELD, Record, ValidationError};

use crate::db::{Database, StorageError};

/// Errors from catalogue operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Inbound data violates the record schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The document store failed or is unavailable.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A stored document no longer satisfies its schema.
    #[error("stored {collection} document is invalid: {source}")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// List every `R` record matching `filter`, in write order.
///
/// # Errors
///
/// Returns `CatalogError::Storage` if the read fails.
/// Returns `CatalogError::Corrupt` if a stored document fails validation.
#[instrument(skip(db), fields(collection = R::COLLECTION))]
pub async fn list<R: Record>(db: &Database, filter: &Filter) -> Result<Vec<R>, CatalogError> {
    let documents = db.get_documents(R::COLLECTION, filter).await?;

    documents
        .into_iter()
        .map(|mut document| {
            document.remove(ID_FIELD);
            R::from_document(&document).map_err(|source| CatalogError::Corrupt {
                collection: R::COLLECTION,
                source,
            })
        })
        .collect()
}

/// Validate `raw` as an `R` record and store it.
///
/// Returns the validated record. Nothing is written if validation fails.
///
/// # Errors
///
/// Returns `CatalogError::Validation` if `raw` violates the schema.
/// Returns `CatalogError::Storage` if the write fails.
#[instrument(skip(db, raw), fields(collection = R::COLLECTION))]
pub async fn add<R: Record>(db: &Database, raw: &Value) -> Result<R, CatalogError> {
    let record = R::from_value(raw)?;
    db.create_document(R::COLLECTION, &record).await?;
    Ok(record)
}
