//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Service banner
//! GET  /test                   - Database status report
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the store)
//!
//! # Catalogue
//! GET  /retailers?country=     - List retailers
//! GET  /macbooks               - List MacBook models
//! GET  /offers?country=&macbook_model= - List offers
//! POST /offers                 - Create an offer
//! GET  /posts                  - List blog posts
//! POST /posts                  - Create a blog post
//!
//! # Seeding
//! POST /seed/retailers         - Insert starter retailers
//! POST /seed/macbooks          - Insert starter MacBook models
//! ```

pub mod health;
pub mod macbooks;
pub mod offers;
pub mod posts;
pub mod retailers;
pub mod seed;
pub mod status;

use axum::Router;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use macprice_core::CountryCode;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

/// Body returned by successful create endpoints.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub status: &'static str,
}

impl CreatedResponse {
    pub(crate) const OK: Self = Self { status: "ok" };
}

/// Create all routes for the service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(status::router())
        .merge(health::router())
        .merge(retailers::router())
        .merge(macbooks::router())
        .merge(offers::router())
        .merge(posts::router())
        .nest("/seed", seed::router())
}

/// Build the application with state, CORS and request tracing applied.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Map a malformed query string to a 400 response.
pub(crate) fn bad_query(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Map an unreadable JSON body to a 400 response.
pub(crate) fn bad_json(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Drop a query parameter that was given without a value (`?country=`).
pub(crate) fn non_empty(param: Option<String>) -> Option<String> {
    param.filter(|v| !v.is_empty())
}

/// Parse the optional `country` query parameter.
///
/// An empty value means no filter; anything other than a supported code is
/// rejected.
pub(crate) fn country_param(param: Option<String>) -> Result<Option<CountryCode>, AppError> {
    non_empty(param)
        .map(|code| {
            code.parse::<CountryCode>().map_err(|e| {
                AppError::BadRequest(format!("{e}; expected one of {}", CountryCode::ALLOWED))
            })
        })
        .transpose()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::db::{Database, MemoryStore};
    use crate::state::AppState;

    /// Application backed by an empty in-memory store.
    pub fn memory_app() -> (Router, Database) {
        let db = Database::new(MemoryStore::new());
        (app_with(db.clone()), db)
    }

    /// Application with the given store handle and default configuration.
    pub fn app_with(db: Database) -> Router {
        super::app(AppState::new(ServerConfig::default(), db))
    }

    /// Send a request and decode the response body as JSON.
    ///
    /// A body that is not JSON is returned as a JSON string.
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, Method::POST, uri, Some(body)).await
    }
}
