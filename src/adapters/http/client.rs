//! HTTP client for the upstream artist catalogue.
//!
//! Plain unauthenticated GETs against three read-only JSON endpoints.
//! Every failure is mapped onto [`CatalogError`]; nothing is retried here.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::{Artist, RelationsData, UpstreamConfig};
use crate::domain::ports::ArtistSource;

use super::models::RelationsDocument;

/// [`ArtistSource`] backed by the upstream REST API.
#[derive(Debug, Clone)]
pub struct HttpArtistSource {
    /// The underlying HTTP client (connection pooling)
    http: Client,
    /// Base URL without a trailing slash
    base_url: String,
}

impl HttpArtistSource {
    /// Create a client for `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(&UpstreamConfig {
            base_url: base_url.into(),
            ..UpstreamConfig::default()
        })
    }

    /// Create a client from upstream configuration.
    pub fn with_config(config: &UpstreamConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("tourbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and decode the body as JSON.
    ///
    /// `artist_id` is set for per-artist resources so a 404 can surface as
    /// [`CatalogError::NotFound`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        artist_id: Option<u32>,
    ) -> CatalogResult<T> {
        self.get_json_url(&format!("{}{}", self.base_url, path), artist_id)
            .await
    }

    /// GET an absolute `url` and decode the body as JSON.
    async fn get_json_url<T: DeserializeOwned>(
        &self,
        url: &str,
        artist_id: Option<u32>,
    ) -> CatalogResult<T> {
        debug!(%url, "upstream request");

        let resp = self.http.get(url).send().await.map_err(|e| {
            CatalogError::UpstreamUnavailable(format!("GET {url} failed: {e}"))
        })?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(id) = artist_id {
                return Err(CatalogError::NotFound(id));
            }
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::UpstreamUnavailable(format!(
                "GET {url} returned {status}: {body}"
            )));
        }

        let body = resp.text().await.map_err(|e| {
            CatalogError::UpstreamUnavailable(format!("GET {url} body read failed: {e}"))
        })?;

        serde_json::from_str(&body)
            .map_err(|e| CatalogError::DecodeFailure(format!("GET {url}: {e}")))
    }
}

#[async_trait]
impl ArtistSource for HttpArtistSource {
    #[instrument(skip(self))]
    async fn fetch_artists(&self) -> CatalogResult<Vec<Artist>> {
        self.get_json("/artists", None).await
    }

    #[instrument(skip(self))]
    async fn fetch_artist(&self, id: u32) -> CatalogResult<Artist> {
        let artist: Artist = self.get_json(&format!("/artists/{id}"), Some(id)).await?;

        // Unknown ids come back as 200 with a zeroed profile.
        if artist.id != id {
            return Err(CatalogError::NotFound(id));
        }
        Ok(artist)
    }

    #[instrument(skip(self))]
    async fn fetch_relations(&self, id: u32) -> CatalogResult<RelationsData> {
        let doc: RelationsDocument = self.get_json(&format!("/relation/{id}"), Some(id)).await?;
        Ok(doc.dates_locations)
    }

    /// Absolute `http(s)` locators are followed as-is; anything else (an
    /// opaque id) goes through the id route.
    #[instrument(skip(self))]
    async fn fetch_relations_at(&self, id: u32, locator: &str) -> CatalogResult<RelationsData> {
        if !is_absolute_url(locator) {
            return self.fetch_relations(id).await;
        }
        let doc: RelationsDocument = self.get_json_url(locator, Some(id)).await?;
        Ok(doc.dates_locations)
    }
}

fn is_absolute_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}
