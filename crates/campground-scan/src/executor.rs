use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate};
use rec_gov::AvailabilityFetcher;
use tracing::{debug, info, warn};

use crate::{
    AvailabilityMap, ParkId, ParkResult, ScanError, ScanRequest, aggregate_availability,
    total_sites,
};

/// First day of every month that holds a night of `[start_date, end_date)`
pub fn month_starts(start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<NaiveDate>, ScanError> {
    let mut month = start_date
        .with_day(1)
        .ok_or_else(|| ScanError::DataFormat("Invalid date".to_string()))?;

    let mut months = Vec::new();
    while month < end_date {
        months.push(month);
        month = month
            .checked_add_months(Months::new(1))
            .ok_or_else(|| ScanError::DataFormat("Date out of range".to_string()))?;
    }

    Ok(months)
}

/// Fetch every month of the request for `park_id` and merge it into an [`AvailabilityMap`]
pub async fn park_info(
    fetcher: &dyn AvailabilityFetcher,
    park_id: ParkId,
    request: &ScanRequest,
) -> Result<AvailabilityMap, ScanError> {
    let mut api_data = Vec::new();
    for month_start in month_starts(request.start_date, request.end_date)? {
        api_data.push(fetcher.month_availability(park_id, month_start).await?);
    }

    aggregate_availability(&api_data, &request.filter)
}

/// Check a single park
pub async fn check_park(
    fetcher: &dyn AvailabilityFetcher,
    request: &ScanRequest,
    park_id: ParkId,
) -> Result<ParkResult, ScanError> {
    let park_information = park_info(fetcher, park_id, request).await?;
    let pretty = serde_json::to_string_pretty(&park_information)?;
    debug!("Info for park {}: {}", park_id, pretty);

    let park_name = fetcher.park_name(park_id).await?;
    let counts = total_sites(
        &park_information,
        request.start_date,
        request.end_date,
        request.nights,
    )?;

    if counts.maximum == 0 {
        warn!("Park {}: no campsites matched the requested filters", park_id);
    }
    for (site, windows) in &counts.windows {
        debug!(
            "Park {}: available site {} ({} windows)",
            park_id,
            site,
            windows.len()
        );
    }

    info!(
        "{} ({}): {} of {} sites available",
        park_name, park_id, counts.current, counts.maximum
    );

    Ok(ParkResult {
        park_id,
        park_name,
        counts,
    })
}

/// Check every park of the request in order. The first failure aborts the run.
pub async fn check_parks(
    fetcher: &dyn AvailabilityFetcher,
    request: &ScanRequest,
) -> Result<Vec<ParkResult>, ScanError> {
    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(request.park_ids.len());

    for &park_id in &request.park_ids {
        if !seen.insert(park_id) {
            debug!("Skipping duplicate park {}", park_id);
            continue;
        }
        results.push(check_park(fetcher, request, park_id).await?);
    }

    Ok(results)
}
