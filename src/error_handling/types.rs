//! Error type definitions.
//!
//! This module defines the typed errors raised by the pipeline and the counters
//! used to track silently skipped input.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for opening the GeoIP database.
///
/// Both variants are fatal for the whole run: without the database no host can
/// be resolved.
#[derive(Error, Debug)]
pub enum GeoIpError {
    /// The database file does not exist.
    #[error("The file {} does not exist", .0.display())]
    DatabaseNotFound(PathBuf),

    /// The file exists but could not be read or is not a MaxMind database.
    #[error("Failed to open GeoIP database {}: {source}", path.display())]
    InvalidDatabase {
        /// Database path
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: maxminddb::MaxMindDBError,
    },
}

/// Error types for country aggregation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AggregationError {
    /// A ranked country has no location record.
    ///
    /// The ranking is derived from the same matches the representatives are
    /// drawn from, so this indicates a bug rather than bad input.
    #[error("No location record for ranked country '{country}'")]
    LookupMismatch {
        /// The ranked country with no match
        country: String,
    },
}

/// Error types for a single weather lookup.
///
/// These never abort a run; the lookup reports its temperature as unavailable.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The request could not be sent or no response arrived in time.
    #[error("Weather request failed: {0}")]
    Transport(#[source] ReqwestError),

    /// The API answered with something other than 200 OK.
    #[error("Weather API returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the expected JSON shape.
    #[error("Weather response could not be decoded: {0}")]
    Body(#[source] ReqwestError),
}

/// Per-run counters for each pipeline stage.
///
/// Malformed input and resolution misses are never surfaced as errors, so these
/// counters are the only trace they leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum StageCounter {
    /// Raw lines read from the log file
    LinesRead,
    /// Lines that matched the log format
    RecordsParsed,
    /// Lines that did not match the log format
    MalformedLines,
    /// Records with an error status on a weekday
    HostsRetained,
    /// Host tokens that are not IP addresses or networks
    InvalidAddresses,
    /// Valid addresses with no (complete) GeoIP record
    ResolutionMisses,
    /// Addresses resolved to a country and coordinates
    GeoMatches,
    /// Weather lookups that returned no temperature
    WeatherUnavailable,
}

impl std::fmt::Display for StageCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StageCounter {
    /// Human-readable counter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageCounter::LinesRead => "lines read",
            StageCounter::RecordsParsed => "records parsed",
            StageCounter::MalformedLines => "malformed lines",
            StageCounter::HostsRetained => "hosts retained",
            StageCounter::InvalidAddresses => "invalid addresses",
            StageCounter::ResolutionMisses => "resolution misses",
            StageCounter::GeoMatches => "geo matches",
            StageCounter::WeatherUnavailable => "weather unavailable",
        }
    }
}
