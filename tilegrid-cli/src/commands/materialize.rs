//! Materialize command - convert a grid-section JSON file into tiles.

use std::path::Path;

use tilegrid::config::ConfigFile;
use tilegrid::grid::{materialize_tiles_with_precision, GridLineSet};

use super::print_tiles;
use crate::error::CliError;

/// Read a grid-section response from `path` and print its tiles.
pub fn run(path: &Path, config: &ConfigFile) -> Result<(), CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let lines = GridLineSet::from_json(&bytes).map_err(|e| {
        CliError::InvalidInput(format!("{} is not a grid section: {}", path.display(), e))
    })?;

    let tiles = materialize_tiles_with_precision(&lines, config.grid.key_precision);
    print_tiles(&tiles);
    Ok(())
}
