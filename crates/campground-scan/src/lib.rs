//! # Campground Scan
//!
//! This crate checks campground availability for a stay. It merges monthly
//! Recreation.gov payloads into per-site free dates, finds every run of
//! consecutive free nights long enough for the requested stay, and renders the
//! result as text or JSON.

/// Types for campground scan operations
mod scan_types;
pub use scan_types::*;

/// Consecutive-night window detection
mod consecutive;
pub use consecutive::*;

/// Merging of monthly payloads and per-site counting
mod availability;
pub use availability::*;

/// Fetching and checking parks one after another
mod executor;
pub use executor::*;

/// Text and JSON output
mod report;
pub use report::*;
