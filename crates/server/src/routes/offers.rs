//! Price offers: listing by market and model, and creation.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use macprice_core::{Filter, Offer};

use super::{CreatedResponse, bad_json, bad_query, country_param, non_empty};
use crate::catalog;
use crate::error::Result;
use crate::state::AppState;

/// Build the offer router.
pub fn router() -> Router<AppState> {
    Router::new().route("/offers", get(index).post(create))
}

/// Query parameters for `GET /offers`.
#[derive(Debug, Default, Deserialize)]
pub struct OfferQuery {
    pub country: Option<String>,
    pub macbook_model: Option<String>,
}

/// List offers, optionally filtered by country and exact model name.
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    query: std::result::Result<Query<OfferQuery>, QueryRejection>,
) -> Result<Json<Vec<Offer>>> {
    let Query(query) = query.map_err(bad_query)?;
    let filter = Filter::new()
        .eq_opt("country", country_param(query.country)?)
        .eq_opt("macbook_model", non_empty(query.macbook_model));

    let offers = catalog::list(state.database(), &filter).await?;
    Ok(Json(offers))
}

/// Validate and store a new offer.
#[instrument(skip(state, body))]
async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedResponse>> {
    let Json(body) = body.map_err(bad_json)?;
    let offer: Offer = catalog::add(state.database(), &body).await?;

    tracing::info!(
        macbook_model = offer.macbook_model(),
        retailer = offer.retailer_name(),
        country = %offer.country(),
        "Offer created"
    );
    Ok(Json(CreatedResponse::OK))
}
