//! CLI error type.

use std::fmt;
use std::path::PathBuf;

use tilegrid::app::AppError;
use tilegrid::config::ConfigError;
use tilegrid::coord::CoordError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Bad or missing configuration.
    Config(String),

    /// Invalid command-line input.
    InvalidInput(String),

    /// Reading an input file failed.
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Application startup failed.
    App(AppError),

    /// The grid section could not be fetched.
    Fetch(String),

    /// The async runtime could not be created.
    Runtime(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            CliError::App(e) => write!(f, "{}", e),
            CliError::Fetch(msg) => write!(f, "Grid section fetch failed: {}", msg),
            CliError::Runtime(msg) => write!(f, "Failed to create runtime: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ReadFailed { source, .. } => Some(source),
            CliError::App(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<CoordError> for CliError {
    fn from(e: CoordError) -> Self {
        CliError::InvalidInput(e.to_string())
    }
}

impl From<AppError> for CliError {
    fn from(e: AppError) -> Self {
        CliError::App(e)
    }
}
