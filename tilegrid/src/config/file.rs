//! INI configuration file.

use std::path::{Path, PathBuf};

use ini::Ini;

use super::keys::ConfigKey;
use super::ConfigError;
use crate::grid::DEFAULT_KEY_PRECISION;
use crate::logging::LoggingConfig;
use crate::map::{StaleResultPolicy, TileMapConfig};
use crate::provider::{DEFAULT_TIMEOUT_SECS, WHAT3WORDS_BASE_URL};
use crate::viewport::DEFAULT_SINE_DELTA_THRESHOLD;

/// Directory name under the platform config directory.
const APP_DIR: &str = "tilegrid";

/// Config file name.
const CONFIG_FILE: &str = "config.ini";

/// Default location of the config file (`~/.config/tilegrid/config.ini` on Linux).
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// `[grid]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    pub sine_delta_threshold: f64,
    pub key_precision: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            sine_delta_threshold: DEFAULT_SINE_DELTA_THRESHOLD,
            key_precision: DEFAULT_KEY_PRECISION,
        }
    }
}

/// `[provider]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: WHAT3WORDS_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[refresh]` section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshSettings {
    pub stale_policy: StaleResultPolicy,
}

/// `[camera]` section: where the map opens.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub altitude: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            latitude: 51.53162275481682,
            longitude: -0.28892298029710906,
            zoom: 20.0,
            altitude: 400.0,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub grid: GridSettings,
    pub provider: ProviderSettings,
    pub refresh: RefreshSettings,
    pub camera: CameraSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    /// Parse from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|section| section.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Save to `path`, creating parent directories. Unset values are omitted.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }

        ini.write_to_file(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings for a [`TileMap`](crate::map::TileMap).
    pub fn tile_map_config(&self) -> TileMapConfig {
        TileMapConfig::default()
            .with_threshold(self.grid.sine_delta_threshold)
            .with_key_precision(self.grid.key_precision)
            .with_stale_policy(self.refresh.stale_policy)
    }

    /// Settings for [`init_logging`](crate::logging::init_logging).
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            file: self.logging.file.clone(),
        }
    }
}
