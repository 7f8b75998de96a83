//! Artist CLI commands.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::Artist;
use crate::domain::ports::ArtistSource;
use crate::services::CatalogService;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ArtistListOutput<'a> {
    pub artists: &'a [Artist],
}

impl CommandOutput for ArtistListOutput<'_> {
    fn to_human(&self) -> String {
        if self.artists.is_empty() {
            return "No artists found.".to_string();
        }

        format!(
            "Found {} artist(s):\n{}",
            self.artists.len(),
            TableFormatter::new().format_artists(self.artists)
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ArtistDetailOutput<'a> {
    pub artist: &'a Artist,
}

impl CommandOutput for ArtistDetailOutput<'_> {
    fn to_human(&self) -> String {
        TableFormatter::new().format_artist_detail(self.artist)
    }
}

pub async fn list<S: ArtistSource + 'static>(
    service: &CatalogService<S>,
    json_mode: bool,
) -> Result<()> {
    let artists = service.artists().await?;
    output(&ArtistListOutput { artists: &artists }, json_mode);
    Ok(())
}

pub async fn show<S: ArtistSource + 'static>(
    service: &CatalogService<S>,
    id: u32,
    json_mode: bool,
) -> Result<()> {
    let artist = service.artist_detail(id).await?;
    output(&ArtistDetailOutput { artist: &artist }, json_mode);
    Ok(())
}
