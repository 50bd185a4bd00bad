//! Application bootstrap implementation.
//!
//! Builds the grid provider selected by [`AppConfig`] and a [`TileMap`]
//! seeded with the sample grid, ready to receive viewport notifications.

use tracing::info;

use super::config::{AppConfig, ProviderChoice};
use super::error::AppError;
use crate::coord::Coordinate;
use crate::grid::{sample_grid, GridLineSet};
use crate::map::TileMap;
use crate::provider::{
    AsyncReqwestClient, GridSectionProvider, ProviderError, StaticGridProvider,
    What3WordsProvider,
};

/// The grid provider selected at startup.
pub enum AppProvider {
    What3Words(What3WordsProvider<AsyncReqwestClient>),
    Static(StaticGridProvider),
}

impl AppProvider {
    /// Build the provider for `choice`.
    pub fn from_choice(choice: &ProviderChoice) -> Result<Self, ProviderError> {
        match choice {
            ProviderChoice::What3Words {
                base_url,
                api_key,
                timeout,
            } => {
                let client = AsyncReqwestClient::with_timeout(timeout.as_secs())?;
                Ok(AppProvider::What3Words(
                    What3WordsProvider::new(client, api_key.clone()).with_base_url(base_url.clone()),
                ))
            }
            ProviderChoice::Offline => Ok(AppProvider::Static(StaticGridProvider::sample())),
        }
    }
}

impl GridSectionProvider for AppProvider {
    async fn fetch_grid_section(
        &self,
        corners: [Coordinate; 2],
    ) -> Result<GridLineSet, ProviderError> {
        match self {
            AppProvider::What3Words(p) => p.fetch_grid_section(corners).await,
            AppProvider::Static(p) => p.fetch_grid_section(corners).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            AppProvider::What3Words(p) => p.name(),
            AppProvider::Static(p) => p.name(),
        }
    }
}

/// TileGrid application: a configured tile map.
///
/// # Example
///
/// ```ignore
/// use tilegrid::app::{AppConfig, TileGridApp};
///
/// let app = TileGridApp::start(AppConfig::default())?;
/// let map = app.tile_map();
/// map.on_viewport_change(bounds);
/// ```
pub struct TileGridApp {
    tile_map: TileMap<AppProvider>,
}

impl TileGridApp {
    /// Assemble the application.
    ///
    /// The tile map starts with the sample grid so there is something to
    /// show before the first viewport refresh completes.
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        let provider = AppProvider::from_choice(&config.provider)?;
        info!(
            provider = provider.name(),
            threshold = config.tile_map.sine_delta_threshold,
            camera_lat = config.camera.latitude,
            camera_lng = config.camera.longitude,
            "Starting tile grid"
        );

        let tile_map =
            TileMap::new(provider, config.tile_map.clone()).with_initial_lines(&sample_grid());

        Ok(Self { tile_map })
    }

    /// The tile map.
    pub fn tile_map(&self) -> &TileMap<AppProvider> {
        &self.tile_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ViewportBounds;

    #[test]
    fn test_start_offline_seeds_sample_grid() {
        let app = TileGridApp::start(AppConfig::default()).unwrap();
        assert_eq!(app.tile_map().tiles().len(), 16);
        assert_eq!(app.tile_map().selected(), None);
    }

    #[test]
    fn test_start_with_what3words() {
        let config = AppConfig {
            provider: ProviderChoice::what3words("KEY"),
            ..AppConfig::default()
        };
        let app = TileGridApp::start(config).unwrap();
        assert_eq!(app.tile_map().snapshot().tiles.len(), 16);
    }

    #[tokio::test]
    async fn test_offline_refresh() {
        let app = TileGridApp::start(AppConfig::default()).unwrap();
        let bounds = ViewportBounds::new(
            Coordinate::new(51.5316, -0.2890),
            Coordinate::new(51.5318, -0.2886),
        );

        let handle = app
            .tile_map()
            .on_viewport_change(bounds)
            .into_handle()
            .unwrap();
        let outcome = handle.join().await.unwrap();
        assert!(outcome.is_applied());
        assert_eq!(app.tile_map().snapshot().applied_sequence, 1);
    }
}
