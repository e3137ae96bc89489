//! Retailer listing.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use macprice_core::{Filter, Retailer};

use super::{bad_query, country_param};
use crate::catalog;
use crate::error::Result;
use crate::state::AppState;

/// Build the retailer router.
pub fn router() -> Router<AppState> {
    Router::new().route("/retailers", get(index))
}

/// Query parameters for `GET /retailers`.
#[derive(Debug, Default, Deserialize)]
pub struct RetailerQuery {
    pub country: Option<String>,
}

/// List retailers, optionally limited to one country.
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<RetailerQuery>, QueryRejection>,
) -> Result<Json<Vec<Retailer>>> {
    let Query(query) = query.map_err(bad_query)?;
    let filter = Filter::new().eq_opt("country", country_param(query.country)?);

    let retailers = catalog::list(state.database(), &filter).await?;
    Ok(Json(retailers))
}
