//! # RecGov
//!
//! This crate provides a client for the Recreation.gov camping API, which is used to fetch
//! monthly campsite availability and campground details for a park.

/// Wire types, status values and date layouts used by the Recreation.gov API.
mod types;
pub use types::*;

/// Client configuration with environment overrides.
mod config;
pub use config::*;

/// The fetcher seam consumed by the availability checker.
mod fetcher;
pub use fetcher::*;

/// HTTP client for the Recreation.gov internal camping API.
mod rec_gov_client;
pub use rec_gov_client::*;
