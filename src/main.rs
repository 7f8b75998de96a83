//! Tourbook CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use tourbook::cli::{self, Cli};
use tourbook::infrastructure::logging::{LogConfig, LoggerImpl};
use tourbook::{CatalogCaches, CatalogService, CatalogSettings, ConfigLoader, HttpArtistSource};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        cli::handle_error(&err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let log_config = LogConfig::try_from(&config.logging)?;
    let _logger = LoggerImpl::init(&log_config)?;

    let source = HttpArtistSource::with_config(&config.upstream)
        .context("Failed to build upstream HTTP client")?;
    let service = CatalogService::new(Arc::new(source), CatalogCaches::new())
        .with_settings(CatalogSettings::from_config(&config));

    cli::commands::execute(cli.command, &service, cli.json).await
}
