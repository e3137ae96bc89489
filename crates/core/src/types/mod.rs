//! Value types for MacPrice.
//!
//! This module provides type-safe wrappers for fields with closed or
//! structured value sets.

pub mod country;
pub mod web_url;

pub use country::{CountryCode, CountryCodeError};
pub use web_url::{WebUrl, WebUrlError};
