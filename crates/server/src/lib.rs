//! MacBook price comparison backend library.
//!
//! This crate provides the HTTP service, document access layer and seeding
//! as a library, allowing them to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;
