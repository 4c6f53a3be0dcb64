//! Statistics logging.

use log::info;

use crate::error_handling::{ProcessingStats, StageCounter};

/// Logs a summary of every stage counter for the run.
///
/// Counts of skipped input are the only place malformed lines, invalid
/// addresses and resolution misses become visible.
pub fn log_statistics(stats: &ProcessingStats, elapsed_seconds: f64) {
    info!(
        "Run statistics: lines={}, parsed={}, retained={}, geo_matches={} in {:.2}s",
        stats.get(StageCounter::LinesRead),
        stats.get(StageCounter::RecordsParsed),
        stats.get(StageCounter::HostsRetained),
        stats.get(StageCounter::GeoMatches),
        elapsed_seconds
    );

    let skipped: Vec<String> = [
        StageCounter::MalformedLines,
        StageCounter::InvalidAddresses,
        StageCounter::ResolutionMisses,
        StageCounter::WeatherUnavailable,
    ]
    .into_iter()
    .filter_map(|counter| {
        let count = stats.get(counter);
        (count > 0).then(|| format!("{}={}", counter, count))
    })
    .collect();

    if !skipped.is_empty() {
        info!("Skipped: {}", skipped.join(", "));
    }

    for (counter, count) in stats.snapshot() {
        log::debug!("  {}: {}", counter, count);
    }
}

