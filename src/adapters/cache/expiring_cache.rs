//! Expiring key-value cache with lazy expiration.
//!
//! Entries carry an absolute deadline and are only purged when a lookup
//! finds them expired; there is no background sweeper. Readers share the
//! lock, writers (including the expiry purge) take it exclusively. The lock
//! is never held across anything but map operations.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Fallback horizon when `now + ttl` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<V> {
    Found(V),
    Absent,
}

impl<V> CacheLookup<V> {
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_option(self) -> Option<V> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe string-keyed cache with per-entry expiration.
///
/// Values are cloned out on read; store an `Arc` when values are large.
pub struct ExpiringCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone + Send + Sync> ExpiringCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store `value` under `key` until `now + ttl`, replacing any prior entry.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + FAR_FUTURE);

        self.entries
            .write()
            .await
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Look up `key`, dropping the entry if it has expired.
    pub async fn get(&self, key: &str) -> CacheLookup<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return CacheLookup::Absent,
                Some(entry) if entry.is_live(Instant::now()) => {
                    return CacheLookup::Found(entry.value.clone());
                }
                Some(_) => {}
            }
        }

        // Expired under the read lock. A writer may have refreshed the entry
        // before we got exclusive access, so check again.
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(Instant::now()) => CacheLookup::Found(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                CacheLookup::Absent
            }
            None => CacheLookup::Absent,
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }
}

impl<V: Clone + Send + Sync> Default for ExpiringCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
