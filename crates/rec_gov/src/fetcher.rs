use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{MonthlyAvailability, RecGovError};

/// Source of raw availability data for a park.
///
/// [`crate::RecGovClient`] talks to Recreation.gov; tests plug in canned payloads.
#[async_trait]
pub trait AvailabilityFetcher: Send + Sync {
    /// Availability of every campsite in `park_id` for the month starting at `month_start`.
    async fn month_availability(
        &self,
        park_id: u64,
        month_start: NaiveDate,
    ) -> Result<MonthlyAvailability, RecGovError>;

    /// Display name of the park.
    async fn park_name(&self, park_id: u64) -> Result<String, RecGovError>;
}
