//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! macprice migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `DATABASE_NAME` - Database to migrate
//!
//! # Migration Files
//!
//! `crates/server/migrations/`, embedded at compile time.

use thiserror::Error;

use macprice_server::config::{ConfigError, DatabaseConfig};
use macprice_server::db::PgDocumentStore;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Environment variable has an invalid value.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply pending migrations to the configured database.
///
/// # Errors
///
/// Returns `MigrationError` if the settings are missing, the database cannot
/// be reached, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = DatabaseConfig::from_env()?;

    let url = config
        .url
        .as_ref()
        .ok_or(MigrationError::MissingEnvVar("DATABASE_URL"))?;
    let name = config
        .name
        .as_deref()
        .ok_or(MigrationError::MissingEnvVar("DATABASE_NAME"))?;

    tracing::info!(database = %name, "Connecting to database...");
    let store = PgDocumentStore::connect(url, name).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations")
        .run(store.pool())
        .await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
