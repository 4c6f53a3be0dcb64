//! Main application modules.
//!
//! This module provides the end-of-run statistics summary.

pub mod statistics;

// Re-export public API
pub use statistics::log_statistics;
