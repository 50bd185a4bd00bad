//! Addressable configuration keys (`section.key`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFile;
use super::ConfigError;

/// Every setting that can be read or written by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    GridSineDeltaThreshold,
    GridKeyPrecision,
    ProviderBaseUrl,
    ProviderApiKey,
    ProviderTimeoutSecs,
    RefreshStalePolicy,
    CameraLatitude,
    CameraLongitude,
    CameraZoom,
    CameraAltitude,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        use ConfigKey::*;
        &[
            GridSineDeltaThreshold,
            GridKeyPrecision,
            ProviderBaseUrl,
            ProviderApiKey,
            ProviderTimeoutSecs,
            RefreshStalePolicy,
            CameraLatitude,
            CameraLongitude,
            CameraZoom,
            CameraAltitude,
            LoggingLevel,
            LoggingFile,
        ]
    }

    /// INI section.
    pub fn section(&self) -> &'static str {
        use ConfigKey::*;
        match self {
            GridSineDeltaThreshold | GridKeyPrecision => "grid",
            ProviderBaseUrl | ProviderApiKey | ProviderTimeoutSecs => "provider",
            RefreshStalePolicy => "refresh",
            CameraLatitude | CameraLongitude | CameraZoom | CameraAltitude => "camera",
            LoggingLevel | LoggingFile => "logging",
        }
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        use ConfigKey::*;
        match self {
            GridSineDeltaThreshold => "sine_delta_threshold",
            GridKeyPrecision => "key_precision",
            ProviderBaseUrl => "base_url",
            ProviderApiKey => "api_key",
            ProviderTimeoutSecs => "timeout_secs",
            RefreshStalePolicy => "stale_policy",
            CameraLatitude => "latitude",
            CameraLongitude => "longitude",
            CameraZoom => "zoom",
            CameraAltitude => "altitude",
            LoggingLevel => "level",
            LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        use ConfigKey::*;
        match self {
            GridSineDeltaThreshold => config.grid.sine_delta_threshold.to_string(),
            GridKeyPrecision => config.grid.key_precision.to_string(),
            ProviderBaseUrl => config.provider.base_url.clone(),
            ProviderApiKey => config.provider.api_key.clone().unwrap_or_default(),
            ProviderTimeoutSecs => config.provider.timeout_secs.to_string(),
            RefreshStalePolicy => config.refresh.stale_policy.to_string(),
            CameraLatitude => config.camera.latitude.to_string(),
            CameraLongitude => config.camera.longitude.to_string(),
            CameraZoom => config.camera.zoom.to_string(),
            CameraAltitude => config.camera.altitude.to_string(),
            LoggingLevel => config.logging.level.clone(),
            LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse `value` and store it. An empty value clears optional settings.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        use ConfigKey::*;
        let value = value.trim();
        match self {
            GridSineDeltaThreshold => {
                let threshold: f64 = self.parse(value)?;
                if !(threshold.is_finite() && threshold > 0.0) {
                    return Err(self.invalid(value, "must be a positive number"));
                }
                config.grid.sine_delta_threshold = threshold;
            }
            GridKeyPrecision => {
                let precision: usize = self.parse(value)?;
                if precision > 15 {
                    return Err(self.invalid(value, "must be between 0 and 15"));
                }
                config.grid.key_precision = precision;
            }
            ProviderBaseUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(self.invalid(value, "must be an http(s) URL"));
                }
                config.provider.base_url = value.to_string();
            }
            ProviderApiKey => {
                config.provider.api_key = (!value.is_empty()).then(|| value.to_string());
            }
            ProviderTimeoutSecs => config.provider.timeout_secs = self.parse(value)?,
            RefreshStalePolicy => {
                config.refresh.stale_policy = value
                    .parse()
                    .map_err(|reason: String| self.invalid(value, &reason))?;
            }
            CameraLatitude => config.camera.latitude = self.parse(value)?,
            CameraLongitude => config.camera.longitude = self.parse(value)?,
            CameraZoom => config.camera.zoom = self.parse(value)?,
            CameraAltitude => config.camera.altitude = self.parse(value)?,
            LoggingLevel => config.logging.level = value.to_string(),
            LoggingFile => {
                config.logging.file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
        }
        Ok(())
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigError> {
        value
            .parse()
            .map_err(|_| self.invalid(value, "not a valid number"))
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
