//! Configuration file handling.
//!
//! Settings live in an INI file under the platform config directory:
//!
//! ```ini
//! [grid]
//! sine_delta_threshold = 0.0004
//! key_precision = 5
//!
//! [provider]
//! base_url = https://api.what3words.com/v3
//! api_key = YOUR_KEY
//! timeout_secs = 30
//!
//! [refresh]
//! stale_policy = last_resolved_wins
//!
//! [camera]
//! latitude = 51.53162275481682
//! longitude = -0.28892298029710906
//! zoom = 20
//! altitude = 400
//!
//! [logging]
//! level = info
//! file = /var/log/tilegrid.log
//! ```

mod file;
mod keys;

pub use file::{
    config_file_path, CameraSettings, ConfigFile, GridSettings, LoggingSettings,
    ProviderSettings, RefreshSettings,
};
pub use keys::ConfigKey;

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, saving or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid INI.
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A value could not be interpreted for its key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// No such `section.key`.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}
