pub mod catalog_service;

pub use catalog_service::{
    artist_key, CatalogCaches, CatalogService, CatalogSettings, ARTISTS_KEY, CONCERTS_KEY,
    LOCATIONS_KEY,
};
