//! Pipeline orchestration.
//!
//! Sequences parsing, filtering, GeoIP resolution, aggregation and weather
//! lookups into one [`Report`].

use std::fmt;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use crate::aggregate::aggregate;
use crate::app::log_statistics;
use crate::config::Config;
use crate::error_handling::{AggregationError, ProcessingStats, StageCounter};
use crate::filter::normalized_hosts;
use crate::geoip::{resolve_hosts, GeoMatch, GeoResolver, MaxMindResolver};
use crate::initialization::init_client;
use crate::parse::{parse_entries, AccessRecord};
use crate::weather::{fetch_all, OpenWeatherClient, Temperature, WeatherFetcher};

/// One output row: a ranked country, its match count and its temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Lowercase country name
    pub country: String,
    /// Number of weekday 5xx requests resolved to this country
    pub count: usize,
    /// Current temperature at the representative location
    pub temperature: Temperature,
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.country, self.count, self.temperature)
    }
}

/// Results of a run.
#[derive(Debug)]
pub struct Report {
    /// At most three rows, most frequent country first
    pub rows: Vec<WeatherReport>,
    /// Per-stage counters
    pub stats: ProcessingStats,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl Report {
    /// Output lines, `<country> <count> <temperature>`, in ranked order.
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(ToString::to_string).collect()
    }
}

/// Parses and filters the full log contents into the list of retained hosts.
pub fn normalize_log(contents: &str, stats: &ProcessingStats) -> Vec<String> {
    let lines: Vec<&str> = contents.lines().collect();
    stats.add(StageCounter::LinesRead, lines.len());

    let records: Vec<AccessRecord> = parse_entries(lines.iter().copied()).collect();
    stats.add(StageCounter::RecordsParsed, records.len());
    stats.add(StageCounter::MalformedLines, lines.len() - records.len());

    let hosts = normalized_hosts(records);
    stats.add(StageCounter::HostsRetained, hosts.len());
    hosts
}

/// Aggregates `matches` and fetches the weather for each ranked country.
///
/// Rows pair ranking entries with temperatures positionally; a failed lookup
/// still yields its row with [`Temperature::Unavailable`].
///
/// # Errors
///
/// `AggregationError::LookupMismatch` if a ranked country has no location.
pub async fn report_weather<W>(
    matches: &[GeoMatch],
    fetcher: &W,
    stats: &ProcessingStats,
) -> Result<Vec<WeatherReport>, AggregationError>
where
    W: WeatherFetcher + ?Sized,
{
    let aggregation = aggregate(matches).inspect_err(|e| {
        log::error!("Internal error while ranking countries: {}", e);
    })?;
    info!(
        "{} distinct countries, reporting on {}",
        aggregation.tally.len(),
        aggregation.ranked.len()
    );

    let coordinates: Vec<(f64, f64)> = aggregation
        .representatives
        .iter()
        .map(|geo| (geo.lat, geo.lon))
        .collect();
    let temperatures = fetch_all(fetcher, &coordinates).await;

    let rows: Vec<WeatherReport> = aggregation
        .ranked
        .into_iter()
        .zip(temperatures)
        .map(|(ranked, temperature)| {
            if !temperature.is_available() {
                stats.increment(StageCounter::WeatherUnavailable);
            }
            WeatherReport {
                country: ranked.country,
                count: ranked.count,
                temperature,
            }
        })
        .collect();
    Ok(rows)
}

/// Resolves `hosts` with `resolver` and reports the weather for the top countries.
///
/// Generic over both collaborators, so callers can supply in-memory tables and
/// canned temperatures.
///
/// # Errors
///
/// `AggregationError::LookupMismatch` if a ranked country has no location.
pub async fn build_report<R, W>(
    hosts: &[String],
    resolver: &R,
    fetcher: &W,
    stats: &ProcessingStats,
) -> Result<Vec<WeatherReport>, AggregationError>
where
    R: GeoResolver + ?Sized,
    W: WeatherFetcher + ?Sized,
{
    let matches = resolve_hosts(resolver, hosts, stats);
    info!("{} of {} hosts resolved", matches.len(), hosts.len());
    report_weather(&matches, fetcher, stats).await
}

/// Runs the whole pipeline for `config`.
///
/// The GeoIP database is released before the first weather request.
///
/// # Errors
///
/// This function will return an error if:
/// - The log file cannot be read
/// - The GeoIP database is missing or unreadable
/// - The HTTP client cannot be built
/// - A ranked country has no location (internal invariant)
///
/// Individual weather failures are not errors; see [`report_weather`].
pub async fn run_report(config: Config) -> Result<Report> {
    let start_time = Instant::now();
    let stats = ProcessingStats::new();

    let bytes = tokio::fs::read(&config.log_file)
        .await
        .with_context(|| format!("Failed to read log file {}", config.log_file.display()))?;
    let contents = String::from_utf8_lossy(&bytes);
    let hosts = normalize_log(&contents, &stats);
    info!(
        "{} weekday server error requests in {}",
        hosts.len(),
        config.log_file.display()
    );

    let matches = {
        let resolver = MaxMindResolver::open(&config.geoip_db)?;
        resolve_hosts(&resolver, &hosts, &stats)
        // database released here
    };
    info!("{} of {} hosts resolved", matches.len(), hosts.len());

    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let weather = OpenWeatherClient::from_config(client, &config);
    let rows = report_weather(&matches, &weather, &stats).await?;

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    log_statistics(&stats, elapsed_seconds);

    Ok(Report {
        rows,
        stats,
        elapsed_seconds,
    })
}
