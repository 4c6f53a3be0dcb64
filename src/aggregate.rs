//! Country aggregation: tally, top-three ranking and representative locations.
//!
//! Ties in the ranking are broken by first occurrence: of two countries with the
//! same count, the one whose first match came earlier ranks higher. The tally
//! keeps countries in first-occurrence order and the ranking is a stable sort of
//! it by descending count.

use std::collections::HashMap;

use crate::config::TOP_COUNTRY_COUNT;
use crate::error_handling::AggregationError;
use crate::geoip::GeoMatch;

/// Occurrence count per lowercase country, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryTally {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl CountryTally {
    /// Counts countries across `matches` in encounter order.
    pub fn from_matches(matches: &[GeoMatch]) -> Self {
        let mut tally = Self::default();
        for geo in matches {
            tally.record(&geo.country);
        }
        tally
    }

    fn record(&mut self, country: &str) {
        match self.index.get(country) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(country.to_string(), self.entries.len());
                self.entries.push((country.to_string(), 1));
            }
        }
    }

    /// Count for `country` (0 if never seen).
    pub fn count(&self, country: &str) -> usize {
        self.index.get(country).map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct countries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no country was seen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-occurrence order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// The `n` most frequent countries, count descending, ties by first occurrence.
    pub fn most_common(&self, n: usize) -> Vec<RankedCountry> {
        let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
        // sort_by is stable, so equal counts keep first-occurrence order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(country, count)| RankedCountry {
                country: country.clone(),
                count: *count,
            })
            .collect()
    }
}

/// A country in the top-three ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCountry {
    /// Lowercase country name
    pub country: String,
    /// Number of matches for the country
    pub count: usize,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Full tally across all matches
    pub tally: CountryTally,
    /// At most three countries, most frequent first
    pub ranked: Vec<RankedCountry>,
    /// First match for each ranked country, same order as `ranked`
    pub representatives: Vec<GeoMatch>,
}

/// First match in `matches` whose country equals `country`, ignoring case.
pub fn first_match<'a>(matches: &'a [GeoMatch], country: &str) -> Option<&'a GeoMatch> {
    let wanted = country.to_lowercase();
    matches.iter().find(|geo| geo.country.to_lowercase() == wanted)
}

/// Joins each ranked country to its first match, in ranking order.
///
/// # Errors
///
/// `AggregationError::LookupMismatch` for the first ranked country with no match.
pub fn representative_locations(
    ranked: &[RankedCountry],
    matches: &[GeoMatch],
) -> Result<Vec<GeoMatch>, AggregationError> {
    ranked
        .iter()
        .map(|entry| {
            first_match(matches, &entry.country)
                .cloned()
                .ok_or_else(|| AggregationError::LookupMismatch {
                    country: entry.country.clone(),
                })
        })
        .collect()
}

/// Tallies countries, ranks the top three and joins each to its first match.
///
/// Fewer than three distinct countries give fewer entries; nothing is padded.
///
/// # Errors
///
/// `AggregationError::LookupMismatch` if a ranked country has no match. The
/// ranking comes from `matches` itself, so this only happens on a bug.
pub fn aggregate(matches: &[GeoMatch]) -> Result<Aggregation, AggregationError> {
    let tally = CountryTally::from_matches(matches);
    let ranked = tally.most_common(TOP_COUNTRY_COUNT);

    let representatives = representative_locations(&ranked, matches)?;

    Ok(Aggregation {
        tally,
        ranked,
        representatives,
    })
}
