//! Service banner and database status report.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use serde_json::{Value, json};

use crate::state::AppState;

/// Longest error excerpt included in the status report.
const MAX_ERROR_CHARS: usize = 80;

/// Build the status router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/test", get(report))
}

/// Database connectivity summary returned by `GET /test`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: String,
    pub collections: Vec<String>,
}

async fn banner() -> Json<Value> {
    Json(json!({ "message": "MacBook Affiliate Backend Running" }))
}

/// Report whether the store is connected and which collections it holds.
///
/// Always answers 200; problems are described in the body.
async fn report(State(state): State<AppState>) -> Json<StatusReport> {
    let db = state.database();
    let settings = &state.config().database;

    let mut report = StatusReport {
        backend: "✅ Running",
        database: "❌ Not Available".to_string(),
        database_url: "❌ Not Set",
        database_name: "❌ Not Set".to_string(),
        collections: Vec::new(),
    };

    if db.is_available() {
        report.database = "✅ Connected".to_string();
        report.database_url = "✅ Set";
        report.database_name = settings
            .name
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        match db.collections().await {
            Ok(names) => report.collections = names,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list collections");
                let excerpt: String = e.to_string().chars().take(MAX_ERROR_CHARS).collect();
                report.database = format!("⚠️ Connected but error: {excerpt}");
            }
        }
    }

    if settings.url.is_some() {
        report.database_url = "✅ Set";
    }
    if settings.name.is_some() {
        report.database_name = "✅ Set".to_string();
    }

    Json(report)
}
