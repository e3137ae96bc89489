//! Integration tests for MacPrice.
//!
//! # Running Tests
//!
//! ```bash
//! # Create the documents table
//! cargo run -p macprice-cli -- migrate
//!
//! # Start the server
//! cargo run -p macprice-server
//!
//! # Run integration tests against it
//! MACPRICE_BASE_URL=http://localhost:8000 cargo test -p macprice-integration-tests -- --ignored
//! ```
//!
//! Tests write to the live store and do not clean up after themselves.

/// Base URL of the server under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("MACPRICE_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Build a URL for `path` on the server under test.
#[must_use]
pub fn url(path: &str) -> String {
    format!("{}{path}", base_url().trim_end_matches('/'))
}
