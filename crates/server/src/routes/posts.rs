//! Blog posts.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use serde_json::Value;
use tracing::instrument;

use macprice_core::{Filter, Post};

use super::{CreatedResponse, bad_json};
use crate::catalog;
use crate::error::Result;
use crate::state::AppState;

/// Build the post router.
pub fn router() -> Router<AppState> {
    Router::new().route("/posts", get(index).post(create))
}

#[instrument(skip(state))]
async fn index(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    let posts = catalog::list(state.database(), &Filter::new()).await?;
    Ok(Json(posts))
}

#[instrument(skip(state, body))]
async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreatedResponse>> {
    let Json(body) = body.map_err(bad_json)?;
    let post: Post = catalog::add(state.database(), &body).await?;

    tracing::info!(slug = post.slug(), "Post created");
    Ok(Json(CreatedResponse::OK))
}
