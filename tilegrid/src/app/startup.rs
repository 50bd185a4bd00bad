//! Process startup: configuration file and logging.

use std::path::Path;

use super::error::AppError;
use crate::config::ConfigFile;
use crate::logging::{init_logging, LoggingGuard};

/// Load the configuration file from `path`, or from the default location.
///
/// A missing file yields defaults; an unreadable or invalid one is an error.
pub fn load_settings(path: Option<&Path>) -> Result<ConfigFile, AppError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Install logging from the `[logging]` section.
///
/// `verbose` forces the `debug` level. Hold the returned guard until exit.
pub fn start_logging(config: &ConfigFile, verbose: bool) -> Result<LoggingGuard, AppError> {
    let mut logging = config.logging_config();
    if verbose {
        logging.level = "debug".to_string();
    }
    Ok(init_logging(&logging)?)
}
