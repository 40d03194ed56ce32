//! Command line entry point for checking campground availability on recreation.gov.
//!
//! Exits with 0 when a site is available, 1 when none is, and 2 on errors.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use campground_scan::{check_parks, render};
use clap::Parser;
use rec_gov::{RecGovClient, RecGovConfig};

mod cli;
use cli::Args;

const EXIT_NOT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn init_logger(debug: bool) {
    let default_filter = if debug {
        "warn,rec_check=debug,campground_scan=debug,rec_gov=debug"
    } else {
        "warn"
    };

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));
}

async fn run(args: Args) -> Result<bool> {
    let park_ids = args.parks.source().resolve(io::stdin().lock())?;
    let request = args
        .scan_request(park_ids)
        .validated()
        .context("Invalid arguments")?;

    let config = RecGovConfig::from_env().context("Invalid recreation.gov configuration")?;
    log::debug!("Using recreation.gov API at {}", config.base_url);
    let client = RecGovClient::new(Some(config))?;

    let results = check_parks(&client, &request)
        .await
        .context("Failed to check campground availability")?;

    let (output, has_availabilities) = render(
        &results,
        request.start_date,
        request.end_date,
        args.output_format(),
    )?;
    println!("{}", output);

    Ok(has_availabilities)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logger(args.debug);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_NOT_FOUND),
        Err(e) => {
            log::error!("❌ {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
