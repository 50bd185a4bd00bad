//! Key command - derive the tile key for a south-west corner.

use tilegrid::config::ConfigFile;
use tilegrid::coord::{Coordinate, CoordinatePair};
use tilegrid::grid::tile_key_with_precision;

use crate::error::CliError;

/// Print the key of the tile whose south-west corner is `(lat, lng)`.
pub fn run(lat: f64, lng: f64, config: &ConfigFile) -> Result<(), CliError> {
    let south_west = Coordinate::validated(lat, lng)?;
    // Only the south-west corner contributes to the key.
    let pair = CoordinatePair::new(south_west, south_west);
    println!(
        "{}",
        tile_key_with_precision(&pair, config.grid.key_precision)
    );
    Ok(())
}
