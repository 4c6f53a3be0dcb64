//! GeoIP data structures.

/// A resolved location for one host address.
///
/// Only built when the database supplied a country name and both coordinates;
/// a record missing any of them is treated as no match.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    /// Lowercase English country name
    pub country: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl GeoMatch {
    /// Creates a match, lowercasing the country name.
    pub fn new(country: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            country: country.into().to_lowercase(),
            lat,
            lon,
        }
    }
}
