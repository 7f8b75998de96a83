//! Catalogue aggregation service.
//!
//! Fetches artists and their relations from an [`ArtistSource`], fans out
//! per-artist detail fetches, and memoizes every aggregate behind its own
//! [`ExpiringCache`]. Concurrent misses on the same key may both fetch; the
//! last writer wins.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, instrument, warn};

use crate::adapters::cache::{CacheLookup, ExpiringCache};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::{
    dates_from_concerts, locations_from_concerts, Artist, ArtistConcertsIndex, ArtistDatesIndex,
    ArtistLocationsIndex, CatalogStatistics, Config,
};
use crate::domain::ports::ArtistSource;

pub const ARTISTS_KEY: &str = "artists";
pub const CONCERTS_KEY: &str = "artistConcerts";
pub const LOCATIONS_KEY: &str = "artistLocations";

/// Cache key of one artist's detail aggregate.
pub fn artist_key(id: u32) -> String {
    format!("artist_{id}")
}

/// One cache per aggregate type.
///
/// Built by whoever assembles the service; clones share the same storage.
#[derive(Clone, Default)]
pub struct CatalogCaches {
    pub artists: Arc<ExpiringCache<Arc<Vec<Artist>>>>,
    pub details: Arc<ExpiringCache<Arc<Artist>>>,
    pub concerts: Arc<ExpiringCache<Arc<ArtistConcertsIndex>>>,
    pub locations: Arc<ExpiringCache<Arc<ArtistLocationsIndex>>>,
}

impl CatalogCaches {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Tunables for the aggregation service.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSettings {
    /// TTL applied to every cached aggregate
    pub ttl: Duration,
    /// Highest artist id accepted by [`CatalogService::artist_detail`]
    pub max_artist_id: u32,
    /// Detail fetches allowed in flight during a fan-out
    pub fanout_concurrency: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_artist_id: 52,
            fanout_concurrency: 16,
        }
    }
}

impl CatalogSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ttl: Duration::from_secs(config.cache.ttl_secs),
            max_artist_id: config.catalog.max_artist_id,
            fanout_concurrency: config.catalog.fanout_concurrency.max(1),
        }
    }
}

/// Aggregation service over an upstream artist source.
pub struct CatalogService<S: ArtistSource> {
    source: Arc<S>,
    caches: CatalogCaches,
    settings: CatalogSettings,
}

impl<S: ArtistSource> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            caches: self.caches.clone(),
            settings: self.settings,
        }
    }
}

impl<S: ArtistSource + 'static> CatalogService<S> {
    pub fn new(source: Arc<S>, caches: CatalogCaches) -> Self {
        Self {
            source,
            caches,
            settings: CatalogSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CatalogSettings) -> Self {
        // A zero-permit semaphore would stall every fan-out.
        self.settings = CatalogSettings {
            fanout_concurrency: settings.fanout_concurrency.max(1),
            ..settings
        };
        self
    }

    pub const fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Full artist list, in upstream order.
    #[instrument(skip(self))]
    pub async fn artists(&self) -> CatalogResult<Arc<Vec<Artist>>> {
        if let CacheLookup::Found(artists) = self.caches.artists.get(ARTISTS_KEY).await {
            debug!(count = artists.len(), "artist list cache hit");
            return Ok(artists);
        }

        let artists = Arc::new(self.source.fetch_artists().await?);
        self.caches
            .artists
            .set(ARTISTS_KEY, Arc::clone(&artists), self.settings.ttl)
            .await;

        info!(count = artists.len(), "artist list fetched");
        Ok(artists)
    }

    /// One artist with its relations attached.
    ///
    /// Ids outside `1..=max_artist_id` are rejected without touching the
    /// upstream.
    #[instrument(skip(self))]
    pub async fn artist_detail(&self, id: u32) -> CatalogResult<Arc<Artist>> {
        if id == 0 || id > self.settings.max_artist_id {
            return Err(CatalogError::NotFound(id));
        }
        self.fetch_detail(id, None).await
    }

    /// Detail lookup without the id range check; ids taken from the
    /// upstream list are trusted, and so is their relations locator.
    async fn fetch_detail(&self, id: u32, locator: Option<&str>) -> CatalogResult<Arc<Artist>> {
        let key = artist_key(id);
        if let CacheLookup::Found(artist) = self.caches.details.get(&key).await {
            debug!(artist_id = id, "artist detail cache hit");
            return Ok(artist);
        }

        // Both requests are in flight together; either failing fails the
        // whole detail and nothing is cached.
        let relations = async {
            match locator {
                Some(locator) => self.source.fetch_relations_at(id, locator).await,
                None => self.source.fetch_relations(id).await,
            }
        };
        let (profile, relations) = tokio::try_join!(self.source.fetch_artist(id), relations)?;

        let artist = Arc::new(profile.with_relations(relations));
        self.caches
            .details
            .set(key, Arc::clone(&artist), self.settings.ttl)
            .await;

        debug!(artist_id = id, "artist detail fetched");
        Ok(artist)
    }

    /// Relations of every artist, keyed by artist name.
    ///
    /// Artists whose detail fetch fails are logged and left out; only a
    /// failure to list the artists fails the whole call.
    #[instrument(skip(self))]
    pub async fn all_concerts(&self) -> CatalogResult<Arc<ArtistConcertsIndex>> {
        if let CacheLookup::Found(concerts) = self.caches.concerts.get(CONCERTS_KEY).await {
            debug!(count = concerts.len(), "concerts index cache hit");
            return Ok(concerts);
        }

        let artists = self.artists().await?;
        let index = Arc::new(Mutex::new(ArtistConcertsIndex::new()));
        let semaphore = Arc::new(Semaphore::new(self.settings.fanout_concurrency));
        let mut handles = Vec::with_capacity(artists.len());

        for artist in artists.iter() {
            let service = self.clone();
            let index = Arc::clone(&index);
            let semaphore = Arc::clone(&semaphore);
            let id = artist.id;
            let name = artist.name.clone();
            let locator = artist.relations.clone();

            handles.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return false;
                };

                match service.fetch_detail(id, Some(&locator)).await {
                    Ok(detail) => {
                        let relations = detail.relations_data.clone().unwrap_or_default();
                        index.lock().await.insert(name, relations);
                        true
                    }
                    Err(err) => {
                        warn!(artist = %name, artist_id = id, error = %err, "skipping artist in concerts index");
                        false
                    }
                }
            }));
        }

        let mut skipped = 0usize;
        for outcome in join_all(handles).await {
            match outcome {
                Ok(true) => {}
                Ok(false) => skipped += 1,
                Err(err) => {
                    warn!(error = %err, "artist detail task aborted");
                    skipped += 1;
                }
            }
        }

        let concerts = Arc::new(std::mem::take(&mut *index.lock().await));
        self.caches
            .concerts
            .set(CONCERTS_KEY, Arc::clone(&concerts), self.settings.ttl)
            .await;

        info!(count = concerts.len(), skipped, "concerts index built");
        Ok(concerts)
    }

    /// Locations of every artist, derived from [`Self::all_concerts`].
    #[instrument(skip(self))]
    pub async fn all_locations(&self) -> CatalogResult<Arc<ArtistLocationsIndex>> {
        if let CacheLookup::Found(locations) = self.caches.locations.get(LOCATIONS_KEY).await {
            debug!(count = locations.len(), "locations index cache hit");
            return Ok(locations);
        }

        let concerts = self.all_concerts().await?;
        let locations = Arc::new(locations_from_concerts(&concerts));
        self.caches
            .locations
            .set(LOCATIONS_KEY, Arc::clone(&locations), self.settings.ttl)
            .await;

        info!(count = locations.len(), "locations index built");
        Ok(locations)
    }

    /// Performance dates of every artist, flattened across locations.
    pub async fn all_dates(&self) -> CatalogResult<ArtistDatesIndex> {
        let concerts = self.all_concerts().await?;
        Ok(dates_from_concerts(&concerts))
    }

    /// Histograms over the current artist list.
    pub async fn statistics(&self) -> CatalogResult<CatalogStatistics> {
        let artists = self.artists().await?;
        Ok(CatalogStatistics::from_artists(&artists))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::models::RelationsData;

    /// Source that must never be called.
    #[derive(Default)]
    struct UnreachableSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ArtistSource for UnreachableSource {
        async fn fetch_artists(&self) -> CatalogResult<Vec<Artist>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CatalogError::UpstreamUnavailable("unreachable".into()))
        }

        async fn fetch_artist(&self, _id: u32) -> CatalogResult<Artist> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CatalogError::UpstreamUnavailable("unreachable".into()))
        }

        async fn fetch_relations(&self, _id: u32) -> CatalogResult<RelationsData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CatalogError::UpstreamUnavailable("unreachable".into()))
        }
    }

    #[test]
    fn test_artist_key() {
        assert_eq!(artist_key(7), "artist_7");
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.cache.ttl_secs = 10;
        config.catalog.max_artist_id = 3;
        config.catalog.fanout_concurrency = 0;

        let settings = CatalogSettings::from_config(&config);
        assert_eq!(settings.ttl, Duration::from_secs(10));
        assert_eq!(settings.max_artist_id, 3);
        assert_eq!(settings.fanout_concurrency, 1);
    }

    #[tokio::test]
    async fn test_out_of_range_ids_skip_upstream() {
        let source = Arc::new(UnreachableSource::default());
        let service = CatalogService::new(source.clone(), CatalogCaches::new());

        for id in [0, 53, u32::MAX] {
            let err = service.artist_detail(id).await.unwrap_err();
            assert!(matches!(err, CatalogError::NotFound(got) if got == id));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_list_is_not_cached() {
        let source = Arc::new(UnreachableSource::default());
        let caches = CatalogCaches::new();
        let service = CatalogService::new(source.clone(), caches.clone());

        assert!(service.artists().await.is_err());
        assert!(service.all_locations().await.is_err());
        assert!(caches.artists.is_empty().await);
        assert!(caches.concerts.is_empty().await);
        assert!(caches.locations.is_empty().await);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
