//! Application configuration for TileGridApp.
//!
//! Combines the tile map settings with the provider selection so the
//! application can be assembled from a single value.

use std::time::Duration;

use crate::config::{CameraSettings, ConfigFile};
use crate::map::TileMapConfig;
use crate::provider::{DEFAULT_TIMEOUT_SECS, WHAT3WORDS_BASE_URL};

/// Where grid sections come from.
#[derive(Clone, Debug, PartialEq)]
pub enum ProviderChoice {
    /// The what3words API.
    What3Words {
        base_url: String,
        api_key: String,
        timeout: Duration,
    },

    /// The bundled sample grid; no network access.
    Offline,
}

impl ProviderChoice {
    /// what3words against the public API with the default timeout.
    pub fn what3words(api_key: impl Into<String>) -> Self {
        ProviderChoice::What3Words {
            base_url: WHAT3WORDS_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Application configuration combining all component configs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Detector, key and refresh settings.
    pub tile_map: TileMapConfig,

    /// Grid provider selection.
    pub provider: ProviderChoice,

    /// Initial camera position.
    pub camera: CameraSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tile_map: TileMapConfig::default(),
            provider: ProviderChoice::Offline,
            camera: CameraSettings::default(),
        }
    }
}

impl AppConfig {
    /// Build from the configuration file.
    ///
    /// The what3words provider is selected when an API key is configured;
    /// otherwise the application runs offline on the sample grid.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let provider = match &config.provider.api_key {
            Some(api_key) => ProviderChoice::What3Words {
                base_url: config.provider.base_url.clone(),
                api_key: api_key.clone(),
                timeout: Duration::from_secs(config.provider.timeout_secs),
            },
            None => ProviderChoice::Offline,
        };

        Self {
            tile_map: config.tile_map_config(),
            provider,
            camera: config.camera.clone(),
        }
    }

    /// Force offline mode.
    pub fn offline(mut self) -> Self {
        self.provider = ProviderChoice::Offline;
        self
    }
}
