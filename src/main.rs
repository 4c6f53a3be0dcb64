//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `weekday_outages` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Printing report lines
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use weekday_outages::initialization::init_logger_with;
use weekday_outages::{run_report, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Lets OPENWEATHER_API_KEY live in .env instead of the shell history
    let _ = dotenvy::dotenv();

    let config = Config::from(Opt::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_report(config).await {
        Ok(report) => {
            for line in report.lines() {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("weekday_outages error: {:#}", e);
            process::exit(1);
        }
    }
}
