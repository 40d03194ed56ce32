use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use rec_gov::{DateFormat, RecGovError};
use serde::Serialize;
use validator::{Validate, ValidationError};

/// Numeric campsite identifier
pub type SiteId = u64;

/// Numeric park (campground facility) identifier
pub type ParkId = u64;

/// Site id to the dates on which the site is free.
///
/// A site that passed the filters but has no free date maps to an empty list.
pub type AvailabilityMap = BTreeMap<SiteId, Vec<NaiveDate>>;

/// A bookable stay: `start` is the first night, `end` is the checkout day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DateWindow {
    /// First night of the stay
    pub start: NaiveDate,
    /// Checkout day, the day after the last night
    pub end: NaiveDate,
}

impl DateWindow {
    /// Number of nights covered by the window
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            DateFormat::Input.format(self.start),
            DateFormat::Input.format(self.end)
        )
    }
}

/// Site counts and stay windows for one park over the requested dates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteCounts {
    /// Sites with at least one window
    pub current: usize,
    /// Sites considered, whether or not they have a window
    pub maximum: usize,
    /// Windows per site, only for sites that have at least one
    pub windows: BTreeMap<SiteId, Vec<DateWindow>>,
}

/// Result of checking one park
#[derive(Debug, Clone, PartialEq)]
pub struct ParkResult {
    /// Park that was checked
    pub park_id: ParkId,
    /// Display name of the park
    pub park_name: String,
    /// Counts and windows
    pub counts: SiteCounts,
}

impl ParkResult {
    /// Whether any site in the park can be booked for the requested stay
    pub fn has_availability(&self) -> bool {
        self.counts.current > 0
    }
}

/// Which sites of a park take part in the check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFilter {
    /// Exact campsite type, e.g. `STANDARD NONELECTRIC`
    pub campsite_type: Option<String>,
    /// Only these sites, when non-empty
    pub campsite_ids: BTreeSet<SiteId>,
}

/// A validated availability check
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_scan_request"))]
pub struct ScanRequest {
    /// Parks to check, in order
    #[validate(length(min = 1, message = "At least one park ID is required"))]
    pub park_ids: Vec<ParkId>,

    /// First night of the stay
    pub start_date: NaiveDate,

    /// Departure date
    pub end_date: NaiveDate,

    /// Required consecutive nights, every night of the search when absent
    #[validate(range(min = 1, message = "Please select a positive number of nights"))]
    pub nights: Option<u32>,

    /// Site type and site id filters
    pub filter: SiteFilter,
}

impl ScanRequest {
    /// Validate the request, turning validator errors into [`ScanError::Validation`]
    pub fn validated(self) -> Result<Self, ScanError> {
        self.validate()
            .map_err(|e| ScanError::Validation(e.to_string()))?;
        Ok(self)
    }
}

fn validate_scan_request(request: &ScanRequest) -> Result<(), ValidationError> {
    if request.end_date <= request.start_date {
        return Err(ValidationError::new("invalid_date_range").with_message(Cow::Borrowed(
            "End date must be after start date",
        )));
    }

    if request.park_ids.len() > 1 && !request.filter.campsite_ids.is_empty() {
        return Err(
            ValidationError::new("argument_combination").with_message(Cow::Borrowed(
                "--campsite-ids can only be used with a single park ID",
            )),
        );
    }

    Ok(())
}

/// Custom error type for scan operations
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid date range
    #[error("Invalid date range: end date must be after start date")]
    InvalidDateRange,

    /// Data format error
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Fetching from Recreation.gov failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] RecGovError),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
