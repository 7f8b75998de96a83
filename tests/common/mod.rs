//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tourbook::{Artist, ArtistSource, CatalogError, CatalogResult, RelationsData};

/// Build an artist profile the way the upstream serves it.
pub fn artist(id: u32, name: &str) -> Artist {
    Artist {
        id,
        image: format!("https://groupietrackers.herokuapp.com/api/images/{id}.jpeg"),
        name: name.to_string(),
        members: vec![format!("{name} singer"), format!("{name} drummer")],
        creation_date: 1970 + i32::try_from(id).unwrap_or_default(),
        first_album: "14-12-1973".to_string(),
        locations: format!("https://groupietrackers.herokuapp.com/api/locations/{id}"),
        concert_dates: format!("https://groupietrackers.herokuapp.com/api/dates/{id}"),
        relations: format!("https://groupietrackers.herokuapp.com/api/relation/{id}"),
        relations_data: None,
    }
}

pub fn relations(pairs: Vec<(&str, Vec<&str>)>) -> RelationsData {
    pairs
        .into_iter()
        .map(|(location, dates)| {
            (
                location.to_string(),
                dates.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
}

/// In-memory upstream that counts calls and fails on demand.
#[derive(Default)]
pub struct StubArtistSource {
    artists: Vec<Artist>,
    relations: HashMap<u32, RelationsData>,
    failing_profiles: HashSet<u32>,
    failing_relations: HashSet<u32>,
    fail_list: AtomicBool,
    delay: Option<Duration>,

    pub list_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub relation_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl StubArtistSource {
    /// Source serving `artists`, each playing one show in its own city.
    pub fn new(artists: Vec<Artist>) -> Self {
        let by_id = artists
            .iter()
            .map(|a| {
                let city = format!("{}-city", a.name.to_lowercase());
                (a.id, relations(vec![(city.as_str(), vec!["01-01-2020"])]))
            })
            .collect();

        Self {
            artists,
            relations: by_id,
            ..Self::default()
        }
    }

    pub fn with_relations(mut self, id: u32, data: RelationsData) -> Self {
        self.relations.insert(id, data);
        self
    }

    pub fn failing_profile(mut self, id: u32) -> Self {
        self.failing_profiles.insert(id);
        self
    }

    pub fn failing_relations(mut self, id: u32) -> Self {
        self.failing_relations.insert(id);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_list_failure(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    pub fn relation_calls(&self) -> usize {
        self.relation_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ArtistSource for StubArtistSource {
    async fn fetch_artists(&self) -> CatalogResult<Vec<Artist>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(CatalogError::UpstreamUnavailable("list down".into()));
        }
        Ok(self.artists.clone())
    }

    async fn fetch_artist(&self, id: u32) -> CatalogResult<Artist> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.pause().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_profiles.contains(&id) {
            return Err(CatalogError::UpstreamUnavailable(format!("profile {id} down")));
        }
        self.artists
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn fetch_relations(&self, id: u32) -> CatalogResult<RelationsData> {
        self.relation_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.failing_relations.contains(&id) {
            return Err(CatalogError::DecodeFailure(format!("relations {id} garbled")));
        }
        self.relations
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
