//! Core provider types.

use std::future::Future;

use thiserror::Error;

use crate::coord::Coordinate;
use crate::grid::GridLineSet;

/// Errors returned by grid-section providers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Transport-level failure (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: Vec<u8>,
    },

    /// The service reported an error in its response body.
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },

    /// The response body could not be interpreted as a grid section.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider is missing required settings (e.g. an API key).
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Source of grid sections.
///
/// `corners` is `[south_west, north_east]` exactly as produced by the
/// viewport detector.
///
/// The returned future must be `Send` so fetches can run on spawned tasks.
pub trait GridSectionProvider: Send + Sync {
    /// Fetch the grid lines covering the given corners.
    fn fetch_grid_section(
        &self,
        corners: [Coordinate; 2],
    ) -> impl Future<Output = Result<GridLineSet, ProviderError>> + Send;

    /// Human-readable provider name for logs.
    fn name(&self) -> &str;
}
