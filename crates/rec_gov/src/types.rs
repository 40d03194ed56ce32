use std::collections::BTreeMap;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;

/// Errors returned while talking to Recreation.gov.
#[derive(Debug, thiserror::Error)]
pub enum RecGovError {
    /// Transport level failure (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the external API
    #[error("Rate limited by recreation.gov")]
    RateLimited,

    /// Authentication failed with the external API
    #[error("Authentication failed with recreation.gov")]
    AuthenticationFailed,

    /// The requested park or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success HTTP status
    #[error("API error: HTTP {status} - {body}")]
    Status {
        /// Status code returned by the server
        status: StatusCode,
        /// Response body, if it could be read
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RecGovError {
    /// Whether a request that failed with this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            RecGovError::Http(_) | RecGovError::RateLimited => true,
            RecGovError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}

/// Availability status of a campsite on a given night.
///
/// The API reports these as free-form strings; anything not listed maps to
/// [`AvailabilityStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum AvailabilityStatus {
    /// Bookable
    Available,
    /// Already booked
    Reserved,
    /// Not available for this night
    NotAvailable,
    /// Not available because the booking window has closed
    NotAvailableCutoff,
    /// Cannot be reserved online
    NotReservable,
    /// First come, first served
    WalkUp,
    /// Open for walk-ins only
    Open,
    /// Closed for the season
    Closed,
    /// Not yet released for booking
    NotYetReleased,
    /// Allocated through a lottery
    Lottery,
    /// Any status this crate does not know about
    Unknown,
}

impl AvailabilityStatus {
    /// Whether a site with this status can be booked.
    pub fn is_available(self) -> bool {
        self == AvailabilityStatus::Available
    }
}

impl From<&str> for AvailabilityStatus {
    fn from(status: &str) -> Self {
        match status {
            "Available" => AvailabilityStatus::Available,
            "Reserved" => AvailabilityStatus::Reserved,
            "Not Available" => AvailabilityStatus::NotAvailable,
            "Not Available Cutoff" => AvailabilityStatus::NotAvailableCutoff,
            "Not Reservable" | "Not Reservable Management" => AvailabilityStatus::NotReservable,
            "Walk-up" | "Walk Up" => AvailabilityStatus::WalkUp,
            "Open" => AvailabilityStatus::Open,
            "Closed" => AvailabilityStatus::Closed,
            "NYR" => AvailabilityStatus::NotYetReleased,
            "Lottery" => AvailabilityStatus::Lottery,
            // Legacy RIDB format
            "A" => AvailabilityStatus::Available,
            "R" => AvailabilityStatus::Reserved,
            "X" => AvailabilityStatus::NotAvailable,
            "W" => AvailabilityStatus::WalkUp,
            "N" => AvailabilityStatus::NotReservable,
            _ => AvailabilityStatus::Unknown,
        }
    }
}

impl From<String> for AvailabilityStatus {
    fn from(status: String) -> Self {
        AvailabilityStatus::from(status.as_str())
    }
}

/// Date layouts used on the command line and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2024-06-10`, used for user input and display
    Input,
    /// `2024-06-01T00:00:00.000Z`, the `start_date` query parameter
    ApiRequest,
    /// `2024-06-10T00:00:00Z`, keys of the availability map
    ApiResponse,
}

impl DateFormat {
    /// The `strftime` pattern for this layout.
    pub const fn pattern(self) -> &'static str {
        match self {
            DateFormat::Input => "%Y-%m-%d",
            DateFormat::ApiRequest => "%Y-%m-%dT00:00:00.000Z",
            DateFormat::ApiResponse => "%Y-%m-%dT00:00:00Z",
        }
    }

    /// Render a date in this layout.
    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    /// Parse a date written in this layout.
    pub fn parse(self, value: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(value, self.pattern())
    }
}

/// Response of `camps/availability/campground/{id}/month`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyAvailability {
    /// Campsite id to availability data
    #[serde(default)]
    pub campsites: BTreeMap<String, CampsiteAvailabilityData>,
}

/// Campsite availability data for one month
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampsiteAvailabilityData {
    /// Date (`2024-06-10T00:00:00Z`) to status
    #[serde(default)]
    pub availabilities: BTreeMap<String, AvailabilityStatus>,
    /// Campsite id, repeated from the map key
    #[serde(default)]
    pub campsite_id: Option<String>,
    /// Campsite type, e.g. `STANDARD NONELECTRIC`
    #[serde(default)]
    pub campsite_type: Option<String>,
    /// Loop the site belongs to
    #[serde(default, rename = "loop")]
    pub campsite_loop: Option<String>,
}

/// Response of `camps/campgrounds/{id}`
#[derive(Debug, Deserialize)]
pub struct CampgroundResponse {
    /// Campground details
    pub campground: CampgroundDetails,
}

/// Subset of the campground details we use
#[derive(Debug, Deserialize)]
pub struct CampgroundDetails {
    /// Display name of the campground
    pub facility_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_availability_status() {
        // Internal API format
        assert_eq!(AvailabilityStatus::from("Available"), AvailabilityStatus::Available);
        assert_eq!(AvailabilityStatus::from("Reserved"), AvailabilityStatus::Reserved);
        assert_eq!(
            AvailabilityStatus::from("Not Available"),
            AvailabilityStatus::NotAvailable
        );
        assert_eq!(
            AvailabilityStatus::from("Not Reservable"),
            AvailabilityStatus::NotReservable
        );
        assert_eq!(AvailabilityStatus::from("Walk-up"), AvailabilityStatus::WalkUp);
        assert_eq!(AvailabilityStatus::from("NYR"), AvailabilityStatus::NotYetReleased);

        // Legacy RIDB format
        assert_eq!(AvailabilityStatus::from("A"), AvailabilityStatus::Available);
        assert_eq!(AvailabilityStatus::from("R"), AvailabilityStatus::Reserved);
        assert_eq!(AvailabilityStatus::from("X"), AvailabilityStatus::NotAvailable);

        assert_eq!(AvailabilityStatus::from("unknown"), AvailabilityStatus::Unknown);
        assert_eq!(AvailabilityStatus::from("available"), AvailabilityStatus::Unknown);
    }

    #[test]
    fn test_only_available_is_bookable() {
        assert!(AvailabilityStatus::Available.is_available());
        assert!(!AvailabilityStatus::WalkUp.is_available());
        assert!(!AvailabilityStatus::Open.is_available());
        assert!(!AvailabilityStatus::Unknown.is_available());
    }

    #[test]
    fn test_date_formats() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        assert_eq!(DateFormat::Input.format(date), "2024-06-01");
        assert_eq!(DateFormat::ApiRequest.format(date), "2024-06-01T00:00:00.000Z");
        assert_eq!(DateFormat::ApiResponse.format(date), "2024-06-01T00:00:00Z");

        assert_eq!(DateFormat::ApiResponse.parse("2024-06-01T00:00:00Z").unwrap(), date);
        assert_eq!(DateFormat::Input.parse("2024-06-01").unwrap(), date);
        assert!(DateFormat::Input.parse("06/01/2024").is_err());
        assert!(DateFormat::ApiResponse.parse("2024-06-01").is_err());
    }

    #[test]
    fn test_deserialize_monthly_availability() {
        let body = r#"{
            "campsites": {
                "100": {
                    "availabilities": {
                        "2024-06-01T00:00:00Z": "Available",
                        "2024-06-02T00:00:00Z": "Reserved",
                        "2024-06-03T00:00:00Z": "Something New"
                    },
                    "campsite_id": "100",
                    "campsite_type": "STANDARD NONELECTRIC",
                    "loop": "A",
                    "site": "001",
                    "max_num_people": 6
                }
            }
        }"#;

        let month: MonthlyAvailability = serde_json::from_str(body).unwrap();
        let site = &month.campsites["100"];

        assert_eq!(site.campsite_type.as_deref(), Some("STANDARD NONELECTRIC"));
        assert_eq!(site.campsite_loop.as_deref(), Some("A"));
        assert_eq!(
            site.availabilities["2024-06-01T00:00:00Z"],
            AvailabilityStatus::Available
        );
        assert_eq!(
            site.availabilities["2024-06-03T00:00:00Z"],
            AvailabilityStatus::Unknown
        );
    }

    #[test]
    fn test_deserialize_campground_name() {
        let body = r#"{
            "campground": {
                "facility_id": "232447",
                "facility_name": "Upper Pines",
                "facility_type": "STANDARD"
            }
        }"#;

        let details: CampgroundResponse = serde_json::from_str(body).unwrap();
        assert_eq!(details.campground.facility_name, "Upper Pines");
    }

    #[test]
    fn test_empty_payload_has_no_campsites() {
        let month: MonthlyAvailability = serde_json::from_str("{}").unwrap();
        assert!(month.campsites.is_empty());
    }

    #[test]
    fn test_retryable_errors() {
        assert!(RecGovError::RateLimited.is_retryable());
        assert!(
            RecGovError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !RecGovError::Status {
                status: StatusCode::BAD_REQUEST,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!RecGovError::NotFound("1".to_string()).is_retryable());
        assert!(!RecGovError::AuthenticationFailed.is_retryable());
        assert!(!RecGovError::DataFormat("bad".to_string()).is_retryable());
    }
}
