use chrono::{Datelike, Days, NaiveDate};

use crate::DateWindow;

/// Every `nights`-long stay that fits inside the given free dates.
///
/// Dates may come in any order and may repeat. Each maximal run of consecutive
/// dates of length `L >= nights` contributes `L - nights + 1` windows, one per
/// possible first night. Windows are returned sorted by first night.
pub fn consecutive_windows<I>(available: I, nights: u32) -> Vec<DateWindow>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let nights = nights as usize;
    if nights == 0 {
        return Vec::new();
    }

    let mut dates: Vec<NaiveDate> = available.into_iter().collect();
    dates.sort_unstable();
    dates.dedup();

    maximal_runs(&dates)
        .into_iter()
        .filter(|run| run.len() >= nights)
        .flat_map(|run| run.windows(nights))
        .filter_map(|stay| {
            let end = stay[nights - 1].checked_add_days(Days::new(1))?;
            Some(DateWindow {
                start: stay[0],
                end,
            })
        })
        .collect()
}

/// Split sorted, de-duplicated dates into runs of consecutive days
fn maximal_runs(dates: &[NaiveDate]) -> Vec<&[NaiveDate]> {
    let mut runs = Vec::new();
    let mut run_start = 0;

    for i in 1..=dates.len() {
        let run_ends =
            i == dates.len() || ordinal(dates[i]) != ordinal(dates[i - 1]) + 1;
        if run_ends {
            runs.push(&dates[run_start..i]);
            run_start = i;
        }
    }

    runs
}

fn ordinal(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}
