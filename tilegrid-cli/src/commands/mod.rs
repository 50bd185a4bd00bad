//! CLI subcommands.

pub mod check;
pub mod config;
pub mod fetch;
pub mod key;
pub mod materialize;

use tilegrid::coord::Coordinate;
use tilegrid::grid::Tile;
use tilegrid::viewport::ViewportBounds;

/// Build viewport bounds from `--sw` / `--ne` arguments.
pub fn bounds(south_west: Coordinate, north_east: Coordinate) -> ViewportBounds {
    ViewportBounds::new(south_west, north_east)
}

/// Print one tile per line: key, south-west corner, north-east corner.
pub fn print_tiles(tiles: &[Tile]) {
    for tile in tiles {
        println!(
            "{}  sw={}  ne={}",
            tile.key, tile.diagonal.south_west, tile.diagonal.north_east
        );
    }
    println!("{} tile(s)", tiles.len());
}
