use std::collections::BTreeMap;

use chrono::NaiveDate;
use rec_gov::DateFormat;

use crate::{DateWindow, ParkId, ParkResult, ScanError, SiteId};

/// Marker printed in front of each park line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// At least one site is available
    Success,
    /// No site is available
    Failure,
}

impl Outcome {
    /// Emoji shown for this outcome
    pub const fn emoji(self) -> &'static str {
        match self {
            Outcome::Success => "🏕",
            Outcome::Failure => "❌",
        }
    }
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable summary lines
    Text {
        /// Also list every site and its stay windows
        show_campsite_info: bool,
    },
    /// JSON object keyed by park id
    Json,
}

/// Render results in `format`. Returns the output and whether anything is available.
pub fn render(
    results: &[ParkResult],
    start_date: NaiveDate,
    end_date: NaiveDate,
    format: OutputFormat,
) -> Result<(String, bool), ScanError> {
    match format {
        OutputFormat::Text { show_campsite_info } => Ok(user_output(
            results,
            start_date,
            end_date,
            show_campsite_info,
        )),
        OutputFormat::Json => json_output(results),
    }
}

/// Summary lines, one per park, optionally followed by per-site windows
pub fn user_output(
    results: &[ParkResult],
    start_date: NaiveDate,
    end_date: NaiveDate,
    show_campsite_info: bool,
) -> (String, bool) {
    let mut out = Vec::new();
    let mut has_availabilities = false;

    for result in results {
        let outcome = if result.has_availability() {
            has_availabilities = true;
            Outcome::Success
        } else {
            Outcome::Failure
        };

        out.push(format!(
            "{} {} ({}): {} sites available out of {} sites",
            outcome.emoji(),
            result.park_name,
            result.park_id,
            result.counts.current,
            result.counts.maximum
        ));

        if show_campsite_info {
            for (site_id, windows) in &result.counts.windows {
                out.push(format!(
                    " * Site {} is available on the following dates:",
                    site_id
                ));
                for window in windows {
                    out.push(format!(" * {}", window));
                }
            }
        }
    }

    let header = if has_availabilities {
        format!(
            "Campsites available from {} to {}.",
            DateFormat::Input.format(start_date),
            DateFormat::Input.format(end_date)
        )
    } else {
        "No campsites available: ".to_string()
    };
    out.insert(0, header);

    (out.join("\n"), has_availabilities)
}

/// JSON object mapping park id to its sites and windows, for parks with availability only
pub fn json_output(results: &[ParkResult]) -> Result<(String, bool), ScanError> {
    let available_by_park_id: BTreeMap<ParkId, &BTreeMap<SiteId, Vec<DateWindow>>> = results
        .iter()
        .filter(|result| result.has_availability())
        .map(|result| (result.park_id, &result.counts.windows))
        .collect();

    let has_availabilities = !available_by_park_id.is_empty();
    Ok((serde_json::to_string(&available_by_park_id)?, has_availabilities))
}
