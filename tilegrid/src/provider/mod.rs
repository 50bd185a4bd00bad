//! Grid-section provider abstraction
//!
//! A provider turns a `[south_west, north_east]` corner pair into the set of
//! grid lines covering that box.
//!
//! ```ignore
//! use tilegrid::provider::{AsyncReqwestClient, GridSectionProvider, What3WordsProvider};
//!
//! let provider = What3WordsProvider::new(AsyncReqwestClient::new()?, api_key);
//! let lines = provider.fetch_grid_section([south_west, north_east]).await?;
//! ```

mod fixed;
mod http;
mod types;
mod what3words;

pub use fixed::StaticGridProvider;
pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::{GridSectionProvider, ProviderError};
pub use what3words::{What3WordsProvider, WHAT3WORDS_BASE_URL};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
