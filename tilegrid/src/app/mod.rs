//! Application bootstrap.
//!
//! Loads configuration, installs logging and assembles the grid provider
//! and tile map.
//!
//! # Example
//!
//! ```ignore
//! use tilegrid::app::{AppConfig, TileGridApp};
//! use tilegrid::app::{load_settings, start_logging};
//!
//! let settings = load_settings(None)?;
//! let _guard = start_logging(&settings, false)?;
//! let app = TileGridApp::start(AppConfig::from_config_file(&settings))?;
//! ```

mod bootstrap;
mod config;
mod error;
mod startup;

pub use bootstrap::{AppProvider, TileGridApp};
pub use config::{AppConfig, ProviderChoice};
pub use error::AppError;
pub use startup::{load_settings, start_logging};
