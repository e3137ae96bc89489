//! MacBook catalogue listing.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use macprice_core::{Filter, Macbook};

use crate::catalog;
use crate::error::Result;
use crate::state::AppState;

/// Build the MacBook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/macbooks", get(index))
}

#[instrument(skip(state))]
async fn index(State(state): State<AppState>) -> Result<Json<Vec<Macbook>>> {
    let macbooks = catalog::list(state.database(), &Filter::new()).await?;
    Ok(Json(macbooks))
}
