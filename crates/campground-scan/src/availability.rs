use std::collections::BTreeSet;

use chrono::NaiveDate;
use rec_gov::{CampsiteAvailabilityData, DateFormat, MonthlyAvailability};
use tracing::debug;

use crate::{AvailabilityMap, ScanError, SiteCounts, SiteFilter, SiteId, consecutive_windows};

impl SiteFilter {
    /// Whether `site_id` with the given payload passes the type and id filters
    pub fn matches(&self, site_id: SiteId, campsite: &CampsiteAvailabilityData) -> bool {
        if let Some(ref wanted) = self.campsite_type {
            if campsite.campsite_type.as_deref() != Some(wanted.as_str()) {
                return false;
            }
        }

        self.campsite_ids.is_empty() || self.campsite_ids.contains(&site_id)
    }
}

/// Merge monthly payloads into the free dates of every site that passes `filter`.
pub fn aggregate_availability<'a, I>(
    months: I,
    filter: &SiteFilter,
) -> Result<AvailabilityMap, ScanError>
where
    I: IntoIterator<Item = &'a MonthlyAvailability>,
{
    let mut data = AvailabilityMap::new();

    for month in months {
        for (campsite_id, campsite) in &month.campsites {
            let site_id: SiteId = campsite_id.trim().parse().map_err(|_| {
                ScanError::DataFormat(format!("Campsite id is not numeric: '{}'", campsite_id))
            })?;

            if !filter.matches(site_id, campsite) {
                continue;
            }

            let available = data.entry(site_id).or_default();
            for (date, status) in &campsite.availabilities {
                if status.is_available() {
                    available.push(parse_payload_date(date)?);
                }
            }
        }
    }

    Ok(data)
}

/// Payload keys look like `2024-06-10T00:00:00Z`; a bare `2024-06-10` is accepted too.
fn parse_payload_date(value: &str) -> Result<NaiveDate, ScanError> {
    DateFormat::ApiResponse
        .parse(value)
        .or_else(|_| DateFormat::Input.parse(value))
        .or_else(|_| match value.get(..10) {
            Some(prefix) => DateFormat::Input.parse(prefix),
            None => DateFormat::Input.parse(value),
        })
        .map_err(|e| ScanError::DataFormat(format!("Invalid availability date '{}': {}", value, e)))
}

/// Nights to look for: the requested value when it fits in the search, else every night of it.
pub fn effective_nights(nights: Option<u32>, total_days: u32) -> u32 {
    match nights {
        Some(n) if (1..=total_days).contains(&n) => n,
        _ => {
            debug!("Setting number of nights to {}.", total_days);
            total_days
        }
    }
}

/// Count sites with a stay of `nights` consecutive nights inside `[start_date, end_date)`.
///
/// Dates outside the window are dropped before looking for runs, so no window
/// reaches past `end_date`.
pub fn total_sites(
    park_information: &AvailabilityMap,
    start_date: NaiveDate,
    end_date: NaiveDate,
    nights: Option<u32>,
) -> Result<SiteCounts, ScanError> {
    let total_days = (end_date - start_date).num_days();
    if total_days < 1 {
        return Err(ScanError::InvalidDateRange);
    }
    let total_days = u32::try_from(total_days).map_err(|_| ScanError::InvalidDateRange)?;
    let nights = effective_nights(nights, total_days);

    let mut counts = SiteCounts {
        maximum: park_information.len(),
        ..SiteCounts::default()
    };

    for (site, availabilities) in park_information {
        let in_window: BTreeSet<NaiveDate> = availabilities
            .iter()
            .copied()
            .filter(|date| *date >= start_date && *date < end_date)
            .collect();

        if in_window.is_empty() {
            continue;
        }

        let windows = consecutive_windows(in_window, nights);
        if windows.is_empty() {
            continue;
        }

        counts.current += 1;
        counts.windows.insert(*site, windows);
    }

    Ok(counts)
}
