//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    API_KEY_ENV, DEFAULT_GEOIP_DB, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WEATHER_URL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// Logs go to stderr, so the default level is `warn` to keep interactive runs
/// quiet; stdout only ever carries report lines.
///
/// # Examples
///
/// ```bash
/// # Basic usage
/// weekday_outages access.log "$OPENWEATHER_API_KEY"
///
/// # Key from the environment (or .env), custom database location
/// OPENWEATHER_API_KEY=... weekday_outages access.log --geoip-db /data/GeoLite2-City.mmdb
/// ```
#[derive(Parser)]
#[command(
    name = "weekday_outages",
    about = "Reports the weather in the three countries sending the most weekday 5xx requests."
)]
pub struct Opt {
    /// Access log to analyse
    #[arg(value_parser)]
    pub log_file: PathBuf,

    /// OpenWeather API key
    #[arg(env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: String,

    /// MaxMind GeoLite2-City database (.mmdb)
    #[arg(long, value_parser, default_value = DEFAULT_GEOIP_DB)]
    pub geoip_db: PathBuf,

    /// Weather API endpoint
    #[arg(long, default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    /// Per-request timeout for weather lookups in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use weekday_outages::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     log_file: PathBuf::from("access.log"),
///     api_key: "secret".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct Config {
    /// Access log to analyse
    pub log_file: PathBuf,

    /// Weather API credential
    pub api_key: String,

    /// MaxMind City database path
    pub geoip_db: PathBuf,

    /// Weather API endpoint
    pub weather_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("access.log"),
            api_key: String::new(),
            geoip_db: PathBuf::from(DEFAULT_GEOIP_DB),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            log_file: opt.log_file,
            api_key: opt.api_key,
            geoip_db: opt.geoip_db,
            weather_url: opt.weather_url,
            timeout_seconds: opt.timeout_seconds,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

// The API key never reaches log output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_file", &self.log_file)
            .field("api_key", &"<redacted>")
            .field("geoip_db", &self.geoip_db)
            .field("weather_url", &self.weather_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.geoip_db, PathBuf::from("GeoLite2-City.mmdb"));
        assert_eq!(config.weather_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_opt_positional_arguments() {
        let opt = Opt::try_parse_from(["weekday_outages", "access.log", "key123"])
            .expect("positional arguments should parse");
        assert_eq!(opt.log_file, PathBuf::from("access.log"));
        assert_eq!(opt.api_key, "key123");
        assert_eq!(opt.geoip_db, PathBuf::from(DEFAULT_GEOIP_DB));
        assert!(matches!(opt.log_level, LogLevel::Warn));
        assert!(matches!(opt.log_format, LogFormat::Plain));
    }

    #[test]
    fn test_opt_into_config() {
        let opt = Opt::try_parse_from([
            "weekday_outages",
            "access.log",
            "key123",
            "--geoip-db",
            "/tmp/city.mmdb",
            "--timeout-seconds",
            "3",
            "--log-format",
            "json",
        ])
        .expect("options should parse");
        let config = Config::from(opt);
        assert_eq!(config.geoip_db, PathBuf::from("/tmp/city.mmdb"));
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(matches!(config.log_format, LogFormat::Json));
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = Config {
            api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
