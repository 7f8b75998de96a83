//! Tourbook - cached artist and concert catalogue
//!
//! Tourbook sits in front of a read-only music catalogue API. It fetches
//! artist profiles and their concert relations, fans detail fetches out
//! across every artist, and memoizes each aggregate in a TTL cache.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors and the upstream port
//! - **Adapters** (`adapters`): HTTP upstream client and the expiring cache
//! - **Service Layer** (`services`): Aggregation and fan-out over the port
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tourbook::{CatalogCaches, CatalogService, HttpArtistSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = HttpArtistSource::new("https://groupietrackers.herokuapp.com/api")?;
//!     let service = CatalogService::new(Arc::new(source), CatalogCaches::new());
//!     let locations = service.all_locations().await?;
//!     println!("{} artists on tour", locations.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::{CacheLookup, ExpiringCache};
pub use adapters::http::HttpArtistSource;
pub use domain::errors::{CatalogError, CatalogResult};
pub use domain::models::{
    Artist, ArtistConcertsIndex, ArtistDatesIndex, ArtistLocationsIndex, CatalogStatistics,
    Config, RelationsData,
};
pub use domain::ports::ArtistSource;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CatalogCaches, CatalogService, CatalogSettings};
