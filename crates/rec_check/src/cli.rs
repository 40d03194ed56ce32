use std::collections::BTreeSet;
use std::io::BufRead;

use anyhow::{Context, Result};
use campground_scan::{OutputFormat, ParkId, ScanRequest, SiteFilter, SiteId};
use chrono::NaiveDate;
use clap::Parser;
use rec_gov::DateFormat;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(
    name = "rec-check",
    version,
    about = "Check recreation.gov campgrounds for sites free for consecutive nights"
)]
pub struct Args {
    /// Debug log level
    #[arg(short, long)]
    pub debug: bool,

    /// Start date [YYYY-MM-DD]
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub start_date: NaiveDate,

    /// End date [YYYY-MM-DD]. Departure date.
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub end_date: NaiveDate,

    /// Nights booked (default is all nights in the given search)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub nights: Option<u32>,

    /// Site specific search
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub campsite_ids: Vec<SiteId>,

    /// Campsite ID and available dates
    #[arg(long)]
    pub show_campsite_info: bool,

    /// Search by type of campsite, e.g. "STANDARD NONELECTRIC"
    #[arg(long)]
    pub campsite_type: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json_output: bool,

    #[command(flatten)]
    pub parks: ParkArgs,
}

/// Where park ids come from; exactly one flag is required
#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct ParkArgs {
    /// Park IDs
    #[arg(long, value_name = "PARK", num_args = 1..)]
    pub parks: Vec<ParkId>,

    /// Read the list of park IDs from stdin instead, one per line
    #[arg(long)]
    pub stdin: bool,
}

/// Park ids given on the command line, or to be read from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkSource {
    /// Ids passed with `--parks`
    List(Vec<ParkId>),
    /// One id per line on stdin
    Stdin,
}

impl ParkArgs {
    /// The selected park source
    pub fn source(&self) -> ParkSource {
        if self.stdin {
            ParkSource::Stdin
        } else {
            ParkSource::List(self.parks.clone())
        }
    }
}

impl ParkSource {
    /// Resolve to park ids, reading `input` for [`ParkSource::Stdin`]
    pub fn resolve(self, input: impl BufRead) -> Result<Vec<ParkId>> {
        match self {
            ParkSource::List(parks) => Ok(parks),
            ParkSource::Stdin => read_park_ids(input),
        }
    }
}

fn read_park_ids(input: impl BufRead) -> Result<Vec<ParkId>> {
    let mut parks = Vec::new();

    for line in input.lines() {
        let line = line.context("Failed to read park IDs from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let park_id = line
            .parse::<ParkId>()
            .with_context(|| format!("Not a valid park ID: '{}'", line))?;
        parks.push(park_id);
    }

    Ok(parks)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    DateFormat::Input
        .parse(value)
        .map_err(|e| format!("Not a valid date: '{}' ({})", value, e))
}

impl Args {
    /// Text or JSON, as selected by `--json-output`
    pub fn output_format(&self) -> OutputFormat {
        if self.json_output {
            OutputFormat::Json
        } else {
            OutputFormat::Text {
                show_campsite_info: self.show_campsite_info,
            }
        }
    }

    /// Build the (not yet validated) scan request for `park_ids`
    pub fn scan_request(&self, park_ids: Vec<ParkId>) -> ScanRequest {
        ScanRequest {
            park_ids,
            start_date: self.start_date,
            end_date: self.end_date,
            nights: self.nights,
            filter: SiteFilter {
                campsite_type: self.campsite_type.clone(),
                campsite_ids: self.campsite_ids.iter().copied().collect::<BTreeSet<_>>(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DATES: [&str; 4] = ["--start-date", "2024-06-01", "--end-date", "2024-06-04"];

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let argv = ["rec-check"].iter().chain(DATES.iter()).chain(extra.iter()).copied();
        Args::try_parse_from(argv)
    }

    #[test]
    fn test_parse_parks() {
        let args = parse(&["--parks", "232447", "232450", "--nights", "2"]).unwrap();

        assert_eq!(args.parks.source(), ParkSource::List(vec![232447, 232450]));
        assert_eq!(args.nights, Some(2));
        assert_eq!(args.start_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(
            args.output_format(),
            OutputFormat::Text {
                show_campsite_info: false
            }
        );
    }

    #[test]
    fn test_parse_stdin_and_flags() {
        let args = parse(&[
            "--stdin",
            "--json-output",
            "-d",
            "--campsite-type",
            "STANDARD NONELECTRIC",
        ])
        .unwrap();

        assert_eq!(args.parks.source(), ParkSource::Stdin);
        assert_eq!(args.output_format(), OutputFormat::Json);
        assert!(args.debug);
        assert_eq!(args.campsite_type.as_deref(), Some("STANDARD NONELECTRIC"));
    }

    #[test]
    fn test_parks_and_stdin_are_exclusive() {
        assert!(parse(&["--parks", "232447", "--stdin"]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse(&["--parks", "232447", "--nights", "0"]).is_err());
        assert!(parse(&["--parks", "232447", "--nights", "-1"]).is_err());
        assert!(parse(&["--parks", "yosemite"]).is_err());

        let bad_date = Args::try_parse_from([
            "rec-check",
            "--start-date",
            "06/01/2024",
            "--end-date",
            "2024-06-04",
            "--parks",
            "232447",
        ]);
        assert!(bad_date.is_err());
    }

    #[test]
    fn test_scan_request() {
        let args = parse(&["--parks", "232447", "--campsite-ids", "100", "200"]).unwrap();
        let request = args.scan_request(vec![232447]);

        assert_eq!(request.nights, None);
        assert_eq!(request.filter.campsite_ids, BTreeSet::from([100, 200]));
        assert!(request.validated().is_ok());

        let args = parse(&["--parks", "1", "2", "--campsite-ids", "100"]).unwrap();
        assert!(args.scan_request(vec![1, 2]).validated().is_err());
    }

    #[test]
    fn test_read_park_ids_from_stdin() {
        let input = Cursor::new("232447\n\n  232450 \n");
        let parks = ParkSource::Stdin.resolve(input).unwrap();
        assert_eq!(parks, vec![232447, 232450]);

        let input = Cursor::new("232447\nnot-a-park\n");
        assert!(ParkSource::Stdin.resolve(input).is_err());
    }

    #[test]
    fn test_list_source_ignores_stdin() {
        let parks = ParkSource::List(vec![1]).resolve(Cursor::new("2\n")).unwrap();
        assert_eq!(parks, vec![1]);
    }
}
