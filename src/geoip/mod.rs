//! GeoIP lookup using a MaxMind GeoLite2 City database.
//!
//! This module provides:
//! - Syntactic validation of host tokens before lookup
//! - The [`GeoResolver`] seam and its MaxMind-backed implementation
//! - Batch resolution of the filtered host list

mod lookup;
mod types;
mod validate;

// Re-export public API
pub use lookup::{resolve_hosts, GeoResolver, MaxMindResolver};
pub use types::GeoMatch;
pub use validate::{is_valid_address, lookup_address, parse_network};
