//! Upstream catalogue API adapter.
//!
//! Implements the [`ArtistSource`](crate::domain::ports::ArtistSource) port
//! over HTTPS with reqwest.

pub mod client;
pub mod models;

pub use client::HttpArtistSource;
pub use models::RelationsDocument;
