//! Application configuration and constants.
//!
//! This module provides:
//! - Fixed lookup tables and defaults (status codes, month names, endpoints)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, Opt};
