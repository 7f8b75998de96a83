//! Derived catalogue views built from artists and their relations.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::artist::{Artist, RelationsData};

/// Artist name -> that artist's full relations document.
pub type ArtistConcertsIndex = BTreeMap<String, RelationsData>;

/// Artist name -> every location the artist has played.
pub type ArtistLocationsIndex = BTreeMap<String, BTreeSet<String>>;

/// Artist name -> every performance date, flattened across locations.
pub type ArtistDatesIndex = BTreeMap<String, Vec<String>>;

/// Keep only the location keys of every artist's concerts.
pub fn locations_from_concerts(concerts: &ArtistConcertsIndex) -> ArtistLocationsIndex {
    concerts
        .iter()
        .map(|(name, relations)| (name.clone(), relations.keys().cloned().collect()))
        .collect()
}

/// Flatten every artist's dates, in location order.
pub fn dates_from_concerts(concerts: &ArtistConcertsIndex) -> ArtistDatesIndex {
    concerts
        .iter()
        .map(|(name, relations)| {
            let dates = relations.values().flatten().cloned().collect();
            (name.clone(), dates)
        })
        .collect()
}

/// Histograms over the artist list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub total_artists: usize,
    /// Creation year -> number of artists
    pub by_creation_year: BTreeMap<i32, usize>,
    /// Member count -> number of artists
    pub by_member_count: BTreeMap<usize, usize>,
    /// First album year -> number of artists (unparseable dates are skipped)
    pub by_first_album_year: BTreeMap<i32, usize>,
}

impl CatalogStatistics {
    pub fn from_artists(artists: &[Artist]) -> Self {
        let mut stats = Self {
            total_artists: artists.len(),
            ..Self::default()
        };

        for artist in artists {
            *stats.by_creation_year.entry(artist.creation_date).or_default() += 1;
            *stats.by_member_count.entry(artist.member_count()).or_default() += 1;
            if let Some(year) = artist.first_album_year() {
                *stats.by_first_album_year.entry(year).or_default() += 1;
            }
        }

        stats
    }
}
