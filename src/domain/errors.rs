//! Domain errors for the tourbook catalogue.

use thiserror::Error;

/// Errors surfaced by the aggregation layer.
///
/// A skipped artist inside a fan-out is not represented here: it is logged
/// and omitted from the aggregate, which still succeeds.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Failed to decode upstream response: {0}")]
    DecodeFailure(String),

    #[error("Artist not found: {0}")]
    NotFound(u32),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Returns true for failures caused by the upstream API.
    ///
    /// Network, status and decode failures propagate the same way, so
    /// callers usually only need this distinction.
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_) | Self::DecodeFailure(_)
        )
    }
}
