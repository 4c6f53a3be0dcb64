//! IP address lookup against a MaxMind City database.

use std::net::IpAddr;
use std::path::Path;

use maxminddb::{geoip2, MaxMindDBError, Reader};

use super::types::GeoMatch;
use super::validate::{is_valid_address, lookup_address};
use crate::error_handling::{GeoIpError, ProcessingStats, StageCounter};

/// Maps a host address to a country and coordinates.
///
/// Implementations must never fail per address: an unknown address, a lookup
/// error or an incomplete record all resolve to `None`.
pub trait GeoResolver {
    /// Resolves one address (or network literal).
    fn resolve(&self, address: &str) -> Option<GeoMatch>;
}

impl<F> GeoResolver for F
where
    F: Fn(&str) -> Option<GeoMatch>,
{
    fn resolve(&self, address: &str) -> Option<GeoMatch> {
        self(address)
    }
}

/// GeoIP resolver backed by a MaxMind GeoLite2/GeoIP2 City database.
///
/// The database is read when the resolver is opened and released when it is
/// dropped.
pub struct MaxMindResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxMindResolver {
    /// Opens the database at `path`.
    ///
    /// # Errors
    ///
    /// - `GeoIpError::DatabaseNotFound` if the file does not exist
    /// - `GeoIpError::InvalidDatabase` if it cannot be read as a MaxMind database
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GeoIpError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GeoIpError::DatabaseNotFound(path.to_path_buf()));
        }

        log::info!("Loading GeoIP database from: {}", path.display());
        let reader =
            Reader::open_readfile(path).map_err(|source| GeoIpError::InvalidDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!(
            "GeoIP database type {} built {}",
            reader.metadata.database_type,
            reader.metadata.build_epoch
        );

        Ok(Self { reader })
    }

    fn lookup_city(&self, ip: IpAddr) -> Option<GeoMatch> {
        let city: geoip2::City = match self.reader.lookup(ip) {
            Ok(city) => city,
            Err(MaxMindDBError::AddressNotFoundError(_)) => return None,
            Err(e) => {
                log::debug!("GeoIP lookup failed for {}: {}", ip, e);
                return None;
            }
        };

        geo_match(&city)
    }
}

/// Builds a match from a City record.
///
/// The country is the English name of the registered country, falling back to
/// the country record. A record without a usable name or without both
/// coordinates gives `None`.
fn geo_match(city: &geoip2::City<'_>) -> Option<GeoMatch> {
    // Registered country first: it reflects who owns the address block.
    let country = city
        .registered_country
        .as_ref()
        .and_then(english_name)
        .or_else(|| city.country.as_ref().and_then(english_name))?;
    let location = city.location.as_ref()?;
    let lat = location.latitude?;
    let lon = location.longitude?;

    Some(GeoMatch::new(country, lat, lon))
}

fn english_name<'a>(country: &geoip2::country::Country<'a>) -> Option<&'a str> {
    country
        .names
        .as_ref()?
        .get("en")
        .copied()
        .filter(|name| !name.is_empty())
}

impl GeoResolver for MaxMindResolver {
    fn resolve(&self, address: &str) -> Option<GeoMatch> {
        self.lookup_city(lookup_address(address)?)
    }
}

/// Resolves every valid host in order.
///
/// Invalid host tokens are skipped without a lookup; valid ones the resolver
/// cannot place are skipped after one. Both are counted in `stats`.
pub fn resolve_hosts<R>(resolver: &R, hosts: &[String], stats: &ProcessingStats) -> Vec<GeoMatch>
where
    R: GeoResolver + ?Sized,
{
    let mut matches = Vec::new();
    for host in hosts {
        if !is_valid_address(host) {
            log::debug!("Skipping invalid host address: {:?}", host);
            stats.increment(StageCounter::InvalidAddresses);
            continue;
        }
        match resolver.resolve(host) {
            Some(geo) => {
                stats.increment(StageCounter::GeoMatches);
                matches.push(geo);
            }
            None => {
                log::debug!("No GeoIP match for {}", host);
                stats.increment(StageCounter::ResolutionMisses);
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;
    use std::path::PathBuf;

    fn city(json: &str) -> geoip2::City<'_> {
        serde_json::from_str(json).expect("City record should decode")
    }

    #[test]
    fn test_geo_match_full_record_is_lowercased() {
        let record = city(
            r#"{"registered_country":{"names":{"en":"United Kingdom","de":"Vereinigtes Königreich"}},
                "country":{"names":{"en":"Ireland"}},
                "location":{"latitude":51.5,"longitude":-0.13}}"#,
        );
        assert_eq!(
            geo_match(&record),
            Some(GeoMatch::new("united kingdom", 51.5, -0.13))
        );
    }

    #[test]
    fn test_geo_match_missing_location() {
        let record = city(r#"{"registered_country":{"names":{"en":"Canada"}}}"#);
        assert_eq!(geo_match(&record), None);
    }

    #[test]
    fn test_geo_match_latitude_only() {
        let record = city(
            r#"{"registered_country":{"names":{"en":"Canada"}},"location":{"latitude":45.0}}"#,
        );
        assert_eq!(geo_match(&record), None);
    }

    #[test]
    fn test_geo_match_falls_back_to_country() {
        let record = city(
            r#"{"country":{"names":{"en":"Sweden"}},"location":{"latitude":58.41,"longitude":15.62}}"#,
        );
        assert_eq!(geo_match(&record), Some(GeoMatch::new("sweden", 58.41, 15.62)));
    }

    #[test]
    fn test_geo_match_without_any_country() {
        let record = city(r#"{"location":{"latitude":1.0,"longitude":2.0}}"#);
        assert_eq!(geo_match(&record), None);
    }

    #[test]
    fn test_geo_match_empty_english_name() {
        let record = city(
            r#"{"registered_country":{"names":{"en":""}},"location":{"latitude":1.0,"longitude":2.0}}"#,
        );
        assert_eq!(geo_match(&record), None);

        let record = city(
            r#"{"registered_country":{"names":{"en":""}},"country":{"names":{"en":"Japan"}},
                "location":{"latitude":36.0,"longitude":138.0}}"#,
        );
        assert_eq!(geo_match(&record), Some(GeoMatch::new("japan", 36.0, 138.0)));
    }

    #[test]
    fn test_geo_match_zero_coordinates_accepted() {
        let record = city(
            r#"{"registered_country":{"names":{"en":"Ghana"}},"location":{"latitude":0.0,"longitude":0.0}}"#,
        );
        assert_eq!(geo_match(&record), Some(GeoMatch::new("ghana", 0.0, 0.0)));
    }

    #[test]
    fn test_open_missing_database() {
        let result = MaxMindResolver::open("definitely/not/here/GeoLite2-City.mmdb");
        match result {
            Err(GeoIpError::DatabaseNotFound(path)) => {
                assert_eq!(path, PathBuf::from("definitely/not/here/GeoLite2-City.mmdb"))
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("missing database should not open"),
        }
    }

    #[test]
    fn test_open_directory_is_not_a_database() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        assert!(matches!(
            MaxMindResolver::open(dir.path()),
            Err(GeoIpError::DatabaseNotFound(_))
        ));
    }

    #[test]
    fn test_open_corrupt_database() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"this is not a maxmind database")
            .expect("Failed to write temp file");
        file.flush().expect("Failed to flush temp file");

        assert!(matches!(
            MaxMindResolver::open(file.path()),
            Err(GeoIpError::InvalidDatabase { .. })
        ));
    }

    #[test]
    fn test_resolve_hosts_gates_invalid_tokens() {
        let calls = RefCell::new(Vec::new());
        let resolver = |address: &str| {
            calls.borrow_mut().push(address.to_string());
            match address {
                "1.1.1.1" => Some(GeoMatch::new("Australia", -33.49, 143.21)),
                _ => None,
            }
        };
        let hosts: Vec<String> = ["1.1.1.1", "not-an-ip", "10.0.0.1", "1.1.1.1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stats = ProcessingStats::new();

        let matches = resolve_hosts(&resolver, &hosts, &stats);

        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.country == "australia"));
        assert_eq!(*calls.borrow(), vec!["1.1.1.1", "10.0.0.1", "1.1.1.1"]);
        assert_eq!(stats.get(StageCounter::InvalidAddresses), 1);
        assert_eq!(stats.get(StageCounter::ResolutionMisses), 1);
        assert_eq!(stats.get(StageCounter::GeoMatches), 2);
    }

    #[test]
    fn test_resolve_hosts_empty() {
        let resolver = |_: &str| -> Option<GeoMatch> { None };
        let stats = ProcessingStats::new();
        assert!(resolve_hosts(&resolver, &[], &stats).is_empty());
    }
}
