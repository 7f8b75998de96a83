//! Upstream artist source port.
//!
//! The aggregation service only ever talks to the upstream through this
//! trait, so the HTTP adapter can be swapped for in-memory sources.

use async_trait::async_trait;

use crate::domain::errors::CatalogResult;
use crate::domain::models::{Artist, RelationsData};

/// Read-only access to the upstream artist catalogue.
#[async_trait]
pub trait ArtistSource: Send + Sync {
    /// Fetch the full artist collection, in upstream order.
    async fn fetch_artists(&self) -> CatalogResult<Vec<Artist>>;

    /// Fetch one artist profile. `relations_data` is left unset.
    async fn fetch_artist(&self, id: u32) -> CatalogResult<Artist>;

    /// Fetch one artist's relations document (location -> dates).
    async fn fetch_relations(&self, id: u32) -> CatalogResult<RelationsData>;

    /// Fetch relations through the `relations` locator of a listed artist.
    ///
    /// Sources that cannot follow locators fall back to the id route.
    async fn fetch_relations_at(&self, id: u32, _locator: &str) -> CatalogResult<RelationsData> {
        self.fetch_relations(id).await
    }
}
