//! Configuration constants.
//!
//! This module defines the fixed tables and defaults used throughout the pipeline:
//! the error status set, the month abbreviation table, and the defaults for the
//! external collaborators (GeoIP database, weather API).

/// HTTP status codes that count as a server error for the report.
///
/// Exact set, not a range: 501 (Not Implemented) is deliberately absent.
pub const ERROR_STATUS_CODES: [u16; 5] = [500, 502, 503, 504, 505];

/// Three-letter month abbreviations as they appear in access log timestamps,
/// paired with their calendar month number.
pub const MONTH_TABLE: [(&str, u32); 12] = [
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("May", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

/// Number of countries to report on.
pub const TOP_COUNTRY_COUNT: usize = 3;

// GeoIP
/// Default MaxMind City database file, looked up relative to the working directory
pub const DEFAULT_GEOIP_DB: &str = "GeoLite2-City.mmdb";

// Weather API
/// OpenWeather One Call endpoint (current conditions in `current.temp`)
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/onecall";
/// Unit system requested from the weather API (metric = Celsius)
pub const WEATHER_UNITS: &str = "metric";
/// Per-request timeout for weather API calls in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Environment variable consulted when the API key is not passed positionally
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// User-Agent sent to the weather API.
pub const DEFAULT_USER_AGENT: &str = concat!("weekday_outages/", env!("CARGO_PKG_VERSION"));

/// Marker printed in place of a temperature that could not be retrieved.
pub const UNAVAILABLE_MARKER: &str = "N/A";
