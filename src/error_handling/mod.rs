//! Error handling and processing statistics.
//!
//! This module provides:
//! - Typed errors for initialization, GeoIP database access, weather lookups and aggregation
//! - Per-stage counters for input that is skipped rather than reported
//!
//! Skipped input falls into two buckets, neither of which is an error:
//! - **Malformed input**: unparseable lines, bad timestamps, invalid host tokens
//! - **Resolution misses**: addresses the GeoIP database has no complete record for

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{AggregationError, GeoIpError, InitializationError, StageCounter, WeatherError};
