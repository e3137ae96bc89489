//! Seed the document store with starter retailers and MacBook models.
//!
//! Uses the same validation and write path as the server's `/seed/*`
//! endpoints. Running a seed twice stores every record twice.

use thiserror::Error;
use tracing::info;

use macprice_server::config::{ConfigError, DatabaseConfig, StoreBackend};
use macprice_server::db::Database;
use macprice_server::seed::{self, SeedReport};

/// Which starter set to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedTarget {
    Retailers,
    Macbooks,
    All,
}

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Environment variable has an invalid value.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The in-memory store would be discarded when the command exits.
    #[error("MACPRICE_STORE=memory cannot be seeded from the CLI")]
    MemoryBackend,

    /// No store could be reached.
    #[error("Document store not available; check DATABASE_URL and DATABASE_NAME")]
    Unavailable,

    /// Some records were not stored.
    #[error("{failed} of {total} seed records failed")]
    Incomplete { failed: usize, total: usize },
}

/// Insert the starter records for `target`.
///
/// Every record is attempted even if earlier ones fail.
///
/// # Errors
///
/// Returns `SeedError` if the store is not usable, or
/// `SeedError::Incomplete` if any record failed.
pub async fn run(target: SeedTarget) -> Result<SeedReport, SeedError> {
    let config = DatabaseConfig::from_env()?;
    if config.backend == StoreBackend::Memory {
        return Err(SeedError::MemoryBackend);
    }

    let db = Database::connect(&config).await;
    if !db.is_available() {
        return Err(SeedError::Unavailable);
    }

    let report = match target {
        SeedTarget::Retailers => seed::seed_retailers(&db).await,
        SeedTarget::Macbooks => seed::seed_macbooks(&db).await,
        SeedTarget::All => seed::seed_retailers(&db).await + seed::seed_macbooks(&db).await,
    };

    info!(
        inserted = report.inserted,
        failed = report.failed,
        "Seeding complete!"
    );

    if report.failed > 0 {
        return Err(SeedError::Incomplete {
            failed: report.failed,
            total: report.inserted + report.failed,
        });
    }
    Ok(report)
}
