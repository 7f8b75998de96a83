//! Catalogue-wide CLI commands: the fan-out indexes and statistics.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{
    ArtistConcertsIndex, ArtistDatesIndex, ArtistLocationsIndex, CatalogStatistics,
};
use crate::domain::ports::ArtistSource;
use crate::services::CatalogService;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ConcertsOutput<'a> {
    pub concerts: &'a ArtistConcertsIndex,
}

impl CommandOutput for ConcertsOutput<'_> {
    fn to_human(&self) -> String {
        if self.concerts.is_empty() {
            return "No concerts found.".to_string();
        }
        TableFormatter::new().format_concerts(self.concerts)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct LocationsOutput<'a> {
    pub locations: &'a ArtistLocationsIndex,
}

impl CommandOutput for LocationsOutput<'_> {
    fn to_human(&self) -> String {
        if self.locations.is_empty() {
            return "No locations found.".to_string();
        }
        TableFormatter::new().format_locations(self.locations)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DatesOutput<'a> {
    pub dates: &'a ArtistDatesIndex,
}

impl CommandOutput for DatesOutput<'_> {
    fn to_human(&self) -> String {
        if self.dates.is_empty() {
            return "No dates found.".to_string();
        }
        TableFormatter::new().format_dates(self.dates)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct StatsOutput<'a> {
    pub stats: &'a CatalogStatistics,
}

impl CommandOutput for StatsOutput<'_> {
    fn to_human(&self) -> String {
        TableFormatter::new().format_statistics(self.stats)
    }
}

pub async fn concerts<S: ArtistSource + 'static>(
    service: &CatalogService<S>,
    json_mode: bool,
) -> Result<()> {
    let concerts = service.all_concerts().await?;
    output(&ConcertsOutput { concerts: &concerts }, json_mode);
    Ok(())
}

pub async fn locations<S: ArtistSource + 'static>(
    service: &CatalogService<S>,
    json_mode: bool,
) -> Result<()> {
    let locations = service.all_locations().await?;
    output(&LocationsOutput { locations: &locations }, json_mode);
    Ok(())
}

pub async fn dates<S: ArtistSource + 'static>(
    service: &CatalogService<S>,
    json_mode: bool,
) -> Result<()> {
    let dates = service.all_dates().await?;
    output(&DatesOutput { dates: &dates }, json_mode);
    Ok(())
}

pub async fn stats<S: ArtistSource + 'static>(
    service: &CatalogService<S>,
    json_mode: bool,
) -> Result<()> {
    let stats = service.statistics().await?;
    output(&StatsOutput { stats: &stats }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_locations_json_is_plain_map() {
        let mut locations = ArtistLocationsIndex::new();
        locations.insert(
            "Queen".to_string(),
            BTreeSet::from(["lima-peru".to_string()]),
        );

        let out = LocationsOutput { locations: &locations };
        assert_eq!(
            out.to_json(),
            serde_json::json!({ "Queen": ["lima-peru"] })
        );
    }

    #[test]
    fn test_empty_indexes_have_messages() {
        let concerts = ArtistConcertsIndex::new();
        assert_eq!(
            ConcertsOutput { concerts: &concerts }.to_human(),
            "No concerts found."
        );

        let dates = ArtistDatesIndex::new();
        assert_eq!(DatesOutput { dates: &dates }.to_human(), "No dates found.");
    }
}
