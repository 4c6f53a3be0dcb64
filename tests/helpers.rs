// Shared test helpers for building access logs and canned GeoIP data.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::collections::HashMap;
use std::io::Write;

use tempfile::NamedTempFile;
use weekday_outages::geoip::GeoMatch;

// 10 June 2024 is a Monday
#[allow(dead_code)]
pub const MONDAY: &str = "10/Jun/2024:10:00:00 +0000";
#[allow(dead_code)]
pub const WEDNESDAY: &str = "12/Jun/2024:14:30:00 +0200";
#[allow(dead_code)]
pub const SATURDAY: &str = "08/Jun/2024:10:00:00 +0000";

/// Formats one access log line.
#[allow(dead_code)]
pub fn log_line(host: &str, time: &str, status: u16) -> String {
    format!(
        r#"{} - - [{}] "GET /index.html HTTP/1.1" {} 1024"#,
        host, time, status
    )
}

/// Writes lines to a temporary log file.
#[allow(dead_code)]
pub fn write_log_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for line in lines {
        writeln!(file, "{}", line).expect("Failed to write log line");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// A resolver over a fixed address table.
#[allow(dead_code)]
pub fn table_resolver(
    entries: &[(&str, &str, f64, f64)],
) -> impl Fn(&str) -> Option<GeoMatch> {
    let table: HashMap<String, GeoMatch> = entries
        .iter()
        .map(|(ip, country, lat, lon)| (ip.to_string(), GeoMatch::new(*country, *lat, *lon)))
        .collect();
    move |address: &str| table.get(address).cloned()
}
