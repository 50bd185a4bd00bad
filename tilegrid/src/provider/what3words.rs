//! what3words grid-section provider.
//!
//! Fetches the 3 m × 3 m what3words grid for a bounding box.
//!
//! # API Endpoint
//!
//! ```text
//! GET {base_url}/grid-section?bounding-box={sw_lat},{sw_lng},{ne_lat},{ne_lng}&format=json&key={API_KEY}
//! ```
//!
//! A successful response is a JSON object with a `lines` array; failures
//! carry `{"error": {"code": "...", "message": "..."}}`, typically with an
//! HTTP 4xx status. The service rejects bounding boxes whose diagonal
//! exceeds 4 km (`BadBoundingBoxTooBig`).

use serde::Deserialize;
use tracing::debug;

use crate::coord::Coordinate;
use crate::grid::GridLineSet;
use crate::provider::{AsyncHttpClient, GridSectionProvider, ProviderError};

/// Public what3words v3 API root.
pub const WHAT3WORDS_BASE_URL: &str = "https://api.what3words.com/v3";

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: String,
    message: String,
}

/// Grid-section provider backed by the what3words REST API.
///
/// # Example
///
/// ```no_run
/// use tilegrid::provider::{AsyncReqwestClient, What3WordsProvider};
///
/// let client = AsyncReqwestClient::new().unwrap();
/// let provider = What3WordsProvider::new(client, "YOUR_API_KEY");
/// ```
pub struct What3WordsProvider<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    api_key: String,
}

impl<C: AsyncHttpClient> What3WordsProvider<C> {
    /// Creates a provider against the public API.
    pub fn new(http_client: C, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: WHAT3WORDS_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the provider at a different API root (proxy, self-hosted).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the request URL for the given corners.
    fn build_url(&self, corners: &[Coordinate; 2]) -> String {
        let [sw, ne] = corners;
        format!(
            "{}/grid-section?bounding-box={},{},{},{}&format=json&key={}",
            self.base_url.trim_end_matches('/'),
            sw.lat,
            sw.lng,
            ne.lat,
            ne.lng,
            self.api_key
        )
    }
}

/// Decode a response body into a grid section or an API error.
fn parse_body(body: &[u8]) -> Result<GridLineSet, ProviderError> {
    if let Some(err) = parse_api_error(body) {
        return Err(err);
    }
    GridLineSet::from_json(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

fn parse_api_error(body: &[u8]) -> Option<ProviderError> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .map(|b| ProviderError::Api {
            code: b.error.code,
            message: b.error.message,
        })
}

impl<C: AsyncHttpClient> GridSectionProvider for What3WordsProvider<C> {
    async fn fetch_grid_section(
        &self,
        corners: [Coordinate; 2],
    ) -> Result<GridLineSet, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "what3words API key is not set".to_string(),
            ));
        }

        let url = self.build_url(&corners);
        debug!(sw = %corners[0], ne = %corners[1], "Requesting grid section");

        match self.http_client.get(&url).await {
            Ok(body) => parse_body(&body),
            Err(ProviderError::Status { status, url, body }) => {
                Err(parse_api_error(&body).unwrap_or(ProviderError::Status { status, url, body }))
            }
            Err(e) => Err(e),
        }
    }

    fn name(&self) -> &str {
        "what3words"
    }
}
