//! MacPrice Core - Record schemas and document types.
//!
//! This crate provides the types shared by every MacPrice component:
//! - `server` - JSON API over the document store
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP. Validation happens here so every caller enforces the same rules
//! before a record is written and after it is read back.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for country codes and web URLs
//! - [`schema`] - The four record types and their validation
//! - [`document`] - Untyped documents and equality filters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod document;
pub mod schema;
pub mod types;

pub use document::{Document, Filter, ID_FIELD};
pub use schema::{Macbook, Offer, Post, Record, Retailer, ValidationError};
pub use types::*;
