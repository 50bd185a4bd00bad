//! TileGrid CLI - Command-line interface
//!
//! Inspect tile keys, viewport decisions and grid sections from the shell.

mod commands;
mod error;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tilegrid::app::{load_settings, start_logging};
use tilegrid::config::{config_file_path, ConfigFile};
use tilegrid::coord::Coordinate;
use tilegrid::logging::LoggingGuard;

use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "tilegrid", version, about = "Selectable map grid tiles")]
struct Cli {
    /// Path to config.ini (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the key of the tile with the given south-west corner
    #[command(allow_negative_numbers = true)]
    Key {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lng: f64,
    },

    /// Evaluate a viewport against the change detector
    Check {
        /// South-west corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        sw: Coordinate,
        /// North-east corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        ne: Coordinate,
    },

    /// Convert a grid-section JSON file into tiles
    Materialize {
        /// Grid-section response file
        file: PathBuf,
    },

    /// Fetch the grid for a viewport and print its tiles
    Fetch {
        /// South-west corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        sw: Coordinate,
        /// North-east corner as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        ne: Coordinate,
        /// Fetch even if the viewport is too big
        #[arg(long)]
        force: bool,
        /// Use the bundled sample grid instead of the network
        #[arg(long)]
        offline: bool,
    },

    /// View or modify configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        config: config_path,
        verbose,
        command,
    } = cli;

    match command {
        // Works even when the file is broken, so it can be repaired.
        Commands::Config(command) => {
            let path = config_path.unwrap_or_else(config_file_path);
            commands::config::run(command, &path)
        }
        Commands::Key { lat, lng } => {
            let (config, _guard) = startup(config_path.as_deref(), verbose)?;
            commands::key::run(lat, lng, &config)
        }
        Commands::Check { sw, ne } => {
            let (config, _guard) = startup(config_path.as_deref(), verbose)?;
            commands::check::run(sw, ne, &config)
        }
        Commands::Materialize { file } => {
            let (config, _guard) = startup(config_path.as_deref(), verbose)?;
            commands::materialize::run(&file, &config)
        }
        Commands::Fetch {
            sw,
            ne,
            force,
            offline,
        } => {
            let (config, _guard) = startup(config_path.as_deref(), verbose)?;
            let args = FetchArgs {
                south_west: sw,
                north_east: ne,
                force,
                offline,
            };
            commands::fetch::run(args, &config)
        }
    }
}

/// Load settings and install logging for a command.
fn startup(
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<(ConfigFile, LoggingGuard), CliError> {
    let config = load_settings(config_path)?;
    let guard = start_logging(&config, verbose)?;
    tracing::debug!(?config_path, "Configuration loaded");
    Ok((config, guard))
}
