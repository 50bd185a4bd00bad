//! Fetch command - run one viewport refresh against the configured provider.

use tilegrid::app::{AppConfig, TileGridApp};
use tilegrid::config::ConfigFile;
use tilegrid::coord::Coordinate;
use tilegrid::map::{RefreshOutcome, ViewportOutcome};

use super::{bounds, print_tiles};
use crate::error::CliError;

/// Arguments for the fetch command.
pub struct FetchArgs {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
    /// Skip the change detector.
    pub force: bool,
    /// Use the bundled sample grid instead of the network.
    pub offline: bool,
}

/// Run the fetch command.
pub fn run(args: FetchArgs, config: &ConfigFile) -> Result<(), CliError> {
    let mut app_config = AppConfig::from_config_file(config);
    if args.offline {
        app_config = app_config.offline();
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    runtime.block_on(fetch(args, app_config))
}

async fn fetch(args: FetchArgs, app_config: AppConfig) -> Result<(), CliError> {
    let app = TileGridApp::start(app_config)?;
    let map = app.tile_map();
    let view = bounds(args.south_west, args.north_east);

    let outcome = if args.force {
        map.refresh(view).await
    } else {
        match map.on_viewport_change(view) {
            ViewportOutcome::Refreshing(handle) => handle
                .join()
                .await
                .map_err(|e| CliError::Runtime(e.to_string()))?,
            ViewportOutcome::RangeTooBig(deltas) => {
                println!("Range too big ({}); use --force to fetch anyway", deltas);
                return Ok(());
            }
        }
    };

    match outcome {
        RefreshOutcome::Applied { .. } => {
            print_tiles(&map.tiles());
            Ok(())
        }
        RefreshOutcome::Failed { error, .. } => Err(CliError::Fetch(error.to_string())),
        RefreshOutcome::Superseded { .. } => Ok(()),
    }
}
