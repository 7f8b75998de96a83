//! CLI command implementations.

pub mod artist;
pub mod catalog;

use anyhow::Result;

use crate::cli::types::Commands;
use crate::domain::ports::ArtistSource;
use crate::services::CatalogService;

/// Run one command against an assembled service.
pub async fn execute<S: ArtistSource + 'static>(
    command: Commands,
    service: &CatalogService<S>,
    json_mode: bool,
) -> Result<()> {
    match command {
        Commands::Artists => artist::list(service, json_mode).await,
        Commands::Artist { id } => artist::show(service, id, json_mode).await,
        Commands::Concerts => catalog::concerts(service, json_mode).await,
        Commands::Locations => catalog::locations(service, json_mode).await,
        Commands::Dates => catalog::dates(service, json_mode).await,
        Commands::Stats => catalog::stats(service, json_mode).await,
    }
}
