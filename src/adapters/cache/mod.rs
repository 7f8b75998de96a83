//! In-memory caching layer for aggregate reads.
//!
//! A generic expiring cache; the aggregation service holds one instance
//! per aggregate type so keys of unrelated aggregates can never collide.

pub mod expiring_cache;

pub use expiring_cache::{CacheLookup, ExpiringCache};
