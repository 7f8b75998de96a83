pub mod artist;
pub mod catalog;
pub mod config;

pub use artist::{Artist, RelationsData};
pub use catalog::{
    dates_from_concerts, locations_from_concerts, ArtistConcertsIndex, ArtistDatesIndex,
    ArtistLocationsIndex, CatalogStatistics,
};
pub use config::{CacheConfig, CatalogConfig, Config, LoggingConfig, UpstreamConfig};
