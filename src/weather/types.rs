//! Weather data structures.

use std::fmt;

use serde::Deserialize;

use crate::config::UNAVAILABLE_MARKER;

/// Current temperature for a location, or a marker that it could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    /// Degrees Celsius
    Celsius(f64),
    /// The lookup failed; rendered as `N/A`
    Unavailable,
}

impl Temperature {
    /// True if a temperature was retrieved.
    pub fn is_available(&self) -> bool {
        matches!(self, Temperature::Celsius(_))
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Celsius(value) => write!(f, "{}", value),
            Temperature::Unavailable => f.write_str(UNAVAILABLE_MARKER),
        }
    }
}

/// The subset of the One Call response we read.
#[derive(Debug, Deserialize)]
pub(crate) struct OneCallResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentConditions {
    pub temp: f64,
}
