//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces that infrastructure
//! adapters must implement:
//! - ArtistSource: read access to the upstream artist catalogue
//!
//! These traits keep the aggregation service independent of the HTTP
//! client that serves it in production.

pub mod artist_source;

pub use artist_source::ArtistSource;
