//! Domain layer for the tourbook catalogue
//!
//! This module contains the catalogue models, the error taxonomy and the
//! ports that adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{CatalogError, CatalogResult};
