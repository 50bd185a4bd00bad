//! Application error types.

use std::fmt;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::provider::ProviderError;

/// Errors that can occur while assembling the application.
#[derive(Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is inconsistent.
    Config(ConfigError),

    /// The grid provider could not be created.
    Provider(ProviderError),

    /// Logging could not be initialized.
    Logging(LoggingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Provider(e) => write!(f, "Failed to create grid provider: {}", e),
            AppError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(e) => Some(e),
            AppError::Provider(e) => Some(e),
            AppError::Logging(e) => Some(e),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Provider(e)
    }
}

impl From<LoggingError> for AppError {
    fn from(e: LoggingError) -> Self {
        AppError::Logging(e)
    }
}
