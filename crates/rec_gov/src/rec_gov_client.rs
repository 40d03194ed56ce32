use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    AvailabilityFetcher, CampgroundResponse, DateFormat, MonthlyAvailability, RecGovConfig,
    RecGovError,
};

/// Client for interacting with the recreation.gov camping API
pub struct RecGovClient {
    client: Client,
    config: RecGovConfig,
}

impl RecGovClient {
    /// Create a new recreation.gov API client
    pub fn new(config: Option<RecGovConfig>) -> Result<Self, RecGovError> {
        let config = config.unwrap_or_default();

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| RecGovError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn month_url(&self, park_id: u64) -> String {
        format!(
            "{}/camps/availability/campground/{}/month",
            self.config.base_url, park_id
        )
    }

    fn campground_url(&self, park_id: u64) -> String {
        format!("{}/camps/campgrounds/{}", self.config.base_url, park_id)
    }

    /// Delay before retry number `attempt` (zero based)
    fn backoff_delay(&self, attempt: u32) -> std::time::Duration {
        self.config
            .retry_base_delay
            .saturating_mul(1u32 << attempt.min(16))
    }

    /// GET `url` and decode the JSON body, retrying transient failures with exponential backoff
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, RecGovError> {
        let mut attempt = 0;

        loop {
            match self.get_json_once(url, params).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = self.backoff_delay(attempt);
                    attempt += 1;
                    warn!(
                        "Request to {} failed: {} (retry {}/{} in {:?})",
                        url, e, attempt, self.config.max_retries, delay
                    );
                    sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, RecGovError> {
        debug!("Making request to: {} {:?}", url, params);

        let response = self.client.get(url).query(params).send().await?;

        debug!("API response status: {}", response.status());

        let response = check_status(url, response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| RecGovError::DataFormat(format!("Failed to parse response from {}: {}", url, e)))
    }

    /// Get campground availability for the month starting at `month_start`
    pub async fn get_month_availability(
        &self,
        park_id: u64,
        month_start: NaiveDate,
    ) -> Result<MonthlyAvailability, RecGovError> {
        debug!(
            "Fetching availability for park {} for month starting {}",
            park_id, month_start
        );

        let params = [("start_date", DateFormat::ApiRequest.format(month_start))];

        self.get_json(&self.month_url(park_id), &params).await
    }

    /// Get the display name of a campground
    pub async fn get_park_name(&self, park_id: u64) -> Result<String, RecGovError> {
        debug!("Getting campground details for {}", park_id);

        let details: CampgroundResponse = self.get_json(&self.campground_url(park_id), &[]).await?;

        Ok(details.campground.facility_name)
    }
}

/// Map non-success HTTP statuses onto [`RecGovError`]
async fn check_status(url: &str, response: Response) -> Result<Response, RecGovError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());
    warn!("API request failed with status {}: {}", status, body);

    match status.as_u16() {
        429 => Err(RecGovError::RateLimited),
        401 | 403 => Err(RecGovError::AuthenticationFailed),
        404 => Err(RecGovError::NotFound(url.to_string())),
        _ => Err(RecGovError::Status { status, body }),
    }
}

#[async_trait]
impl AvailabilityFetcher for RecGovClient {
    async fn month_availability(
        &self,
        park_id: u64,
        month_start: NaiveDate,
    ) -> Result<MonthlyAvailability, RecGovError> {
        self.get_month_availability(park_id, month_start).await
    }

    async fn park_name(&self, park_id: u64) -> Result<String, RecGovError> {
        self.get_park_name(park_id).await
    }
}
