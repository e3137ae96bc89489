//! Quick-start seeding endpoints.
//!
//! Not idempotent: each call inserts the full starter set again.

use axum::{Json, Router, extract::State, routing::post};

use crate::db::StorageError;
use crate::error::{AppError, Result};
use crate::seed::{self, SeedReport};
use crate::state::AppState;

/// Build the seed router, nested under `/seed`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/retailers", post(retailers))
        .route("/macbooks", post(macbooks))
}

async fn retailers(State(state): State<AppState>) -> Result<Json<SeedReport>> {
    require_store(&state)?;
    Ok(Json(seed::seed_retailers(state.database()).await))
}

async fn macbooks(State(state): State<AppState>) -> Result<Json<SeedReport>> {
    require_store(&state)?;
    Ok(Json(seed::seed_macbooks(state.database()).await))
}

/// Fail fast instead of reporting every record as failed.
fn require_store(state: &AppState) -> Result<()> {
    if state.database().is_available() {
        Ok(())
    } else {
        Err(AppError::Storage(StorageError::Unavailable))
    }
}
