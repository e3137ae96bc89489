//! `PostgreSQL` document store.
//!
//! All collections share one JSONB table:
//!
//! ```sql
//! documents (
//!     id UUID PRIMARY KEY,        -- exposed to callers as `_id`
//!     seq BIGSERIAL,              -- write order
//!     collection TEXT NOT NULL,
//!     body JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! )
//! ```
//!
//! Queries run at runtime (not `query!`) since document shapes are dynamic.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use uuid::Uuid;

use macprice_core::{Document, Filter, ID_FIELD};

use super::{DocumentStore, StorageError};

/// Document store backed by the `documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Document>,
}

impl DocumentRow {
    fn into_document(self) -> Document {
        let mut document = self.body.0;
        document.insert(ID_FIELD.to_owned(), Value::String(self.id.to_string()));
        document
    }
}

impl PgDocumentStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database` using the connection string `url`.
    ///
    /// The database name overrides any name given in the connection string.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the URL is invalid or the connection cannot
    /// be established.
    pub async fn connect(url: &SecretString, database: &str) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(url.expose_secret())?.database(database);
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn put(&self, collection: &str, document: Document) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(Json(&document))
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::write(collection, e))?;

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        // Containment narrows the scan via the GIN index; the identifier is
        // not part of `body`, so it is only checked after the row is decoded.
        let mut containment = filter.to_document();
        containment.remove(ID_FIELD);

        let rows = sqlx::query_as::<_, DocumentRow>(
            r"
            SELECT id, body
            FROM documents
            WHERE collection = $1
            AND body @> $2
            ORDER BY seq
            ",
        )
        .bind(collection)
        .bind(Json(&containment))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::read(collection, e))?;

        // `@>` is containment, not equality, for nested values
        Ok(rows
            .into_iter()
            .map(DocumentRow::into_document)
            .filter(|doc| filter.matches(doc))
            .collect())
    }

    async fn collections(&self) -> Result<Vec<String>, StorageError> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT collection
            FROM documents
            ORDER BY collection
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::read("documents", e))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::read("documents", e))?;
        Ok(())
    }
}
