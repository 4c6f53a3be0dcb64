//! Tests for command-line parsing.

use clap::Parser;
use std::path::PathBuf;
use weekday_outages::config::{DEFAULT_GEOIP_DB, DEFAULT_WEATHER_URL};
use weekday_outages::{Config, LogFormat, LogLevel, Opt};

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["weekday_outages", "access.log", "abc123"])
        .expect("Failed to parse arguments");
    assert_eq!(opt.log_file, PathBuf::from("access.log"));
    assert_eq!(opt.api_key, "abc123");
    assert_eq!(opt.geoip_db, PathBuf::from(DEFAULT_GEOIP_DB));
    assert_eq!(opt.weather_url, DEFAULT_WEATHER_URL);
    assert_eq!(opt.timeout_seconds, 10);
    assert!(matches!(opt.log_level, LogLevel::Warn));
    assert!(matches!(opt.log_format, LogFormat::Plain));
}

#[test]
fn test_all_options() {
    let opt = Opt::try_parse_from([
        "weekday_outages",
        "/var/log/apache2/access.log",
        "abc123",
        "--geoip-db",
        "/usr/share/GeoIP/GeoLite2-City.mmdb",
        "--weather-url",
        "http://localhost:8080/onecall",
        "--timeout-seconds",
        "30",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("Failed to parse arguments");

    let config = Config::from(opt);
    assert_eq!(config.log_file, PathBuf::from("/var/log/apache2/access.log"));
    assert_eq!(
        config.geoip_db,
        PathBuf::from("/usr/share/GeoIP/GeoLite2-City.mmdb")
    );
    assert_eq!(config.weather_url, "http://localhost:8080/onecall");
    assert_eq!(config.timeout_seconds, 30);
    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
}

#[test]
fn test_missing_log_file_rejected() {
    assert!(Opt::try_parse_from(["weekday_outages"]).is_err());
}

#[test]
fn test_invalid_log_level_rejected() {
    let result = Opt::try_parse_from([
        "weekday_outages",
        "access.log",
        "abc123",
        "--log-level",
        "verbose",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_timeout_rejected() {
    let result = Opt::try_parse_from([
        "weekday_outages",
        "access.log",
        "abc123",
        "--timeout-seconds",
        "-1",
    ]);
    assert!(result.is_err());
}
