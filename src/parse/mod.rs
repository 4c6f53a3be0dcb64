//! Access log parsing.
//!
//! Converts raw access log lines into [`AccessRecord`] values using a fixed
//! structural pattern:
//!
//! ```text
//! HOST IDENTITY USER [DD/Mon/YYYY:HH:MM:SS +ZZZZ] "REQUEST" STATUS BYTES
//! ```
//!
//! Lines that do not match the pattern in full produce no record. They are
//! skipped silently; callers that need to know how many were dropped compare
//! the number of records against the number of lines.

use std::sync::LazyLock;

use regex::Regex;


/// Pattern for a single access log line, anchored at both ends.
///
/// The request is matched lazily so a `"` inside the request only ends it when
/// followed by the status and bytes fields.
static LOG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<host>\S+)\s+",
        r"(?P<identity>\S+)\s+",
        r"(?P<user>\S+)\s+",
        r"\[(?P<time>[^\]]*)\]\s+",
        r#""(?P<request>.*?)"\s+"#,
        r"(?P<status>\d{3})\s+",
        r"(?P<bytes>\d+|-)\s*$",
    ))
    .expect("access log pattern is a valid regex")
});

/// One parsed access log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRecord {
    /// Client address or network literal (not validated here)
    pub host: String,
    /// RFC 1413 identity, usually `-`
    pub identity: String,
    /// Authenticated user, usually `-`
    pub user: String,
    /// Raw timestamp, `DD/Mon/YYYY:HH:MM:SS +ZZZZ`
    pub time: String,
    /// Raw request line, e.g. `GET / HTTP/1.1`
    pub request: String,
    /// HTTP status code
    pub status: u16,
    /// Response size in bytes, or `-` when unknown
    pub bytes: String,
}

/// Parses a single line, returning `None` if it does not match the log format.
pub fn parse_line(line: &str) -> Option<AccessRecord> {
    let caps = LOG_PATTERN.captures(line)?;
    Some(AccessRecord {
        host: caps["host"].to_string(),
        identity: caps["identity"].to_string(),
        user: caps["user"].to_string(),
        time: caps["time"].to_string(),
        request: caps["request"].to_string(),
        status: caps["status"].parse().ok()?,
        bytes: caps["bytes"].to_string(),
    })
}

/// Lazily parses a sequence of lines.
///
/// The returned iterator is single-pass unless `lines` can be iterated again
/// (e.g. a slice), in which case calling this again restarts parsing.
pub fn parse_entries<I, S>(lines: I) -> impl Iterator<Item = AccessRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().filter_map(|line| {
        let record = parse_line(line.as_ref());
        if record.is_none() {
            log::trace!("Skipping unparseable log line: {:?}", line.as_ref());
        }
        record
    })
}
