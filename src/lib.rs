//! weekday_outages library: weekday server error geography and weather
//!
//! This library reads a web server access log, keeps the requests that ended in
//! a server error (500, 502, 503, 504 or 505) on a weekday, resolves their
//! client addresses to countries with a MaxMind GeoLite2-City database, ranks
//! the three most frequent countries and looks up the current temperature at a
//! representative location in each.
//!
//! # Example
//!
//! ```no_run
//! use weekday_outages::{run_report, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     log_file: PathBuf::from("access.log"),
//!     api_key: "openweather-key".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_report(config).await?;
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Weather lookups are async; call [`run_report`] from within a Tokio runtime.

#![warn(missing_docs)]

pub mod aggregate;
mod app;
pub mod config;
pub mod error_handling;
pub mod filter;
pub mod geoip;
pub mod initialization;
pub mod parse;
mod run;
pub mod weather;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use run::{build_report, normalize_log, report_weather, run_report, Report, WeatherReport};
