//! Grid structure → tile diagonals.

use serde::Serialize;

use super::destructure::{destructure, GridStructure};
use super::key::{tile_key_with_precision, TileKey, DEFAULT_KEY_PRECISION};
use super::lines::GridLineSet;
use crate::coord::{Coordinate, CoordinatePair};

/// One grid cell with its derived identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub diagonal: CoordinatePair,
    pub key: TileKey,
}

impl Tile {
    /// Build a tile, deriving its key at `precision` decimal places.
    pub fn new(diagonal: CoordinatePair, precision: usize) -> Self {
        Self {
            key: tile_key_with_precision(&diagonal, precision),
            diagonal,
        }
    }
}

/// Pair adjacent grid boundaries into tile diagonals.
///
/// Emits rows south to north; within a row, west to east. No checks are
/// made on the input, so coincident boundaries produce zero-area tiles.
pub fn pair_boundaries(grid: &GridStructure) -> Vec<CoordinatePair> {
    let mut pairs = Vec::with_capacity(grid.tile_count());

    for rows in grid.latitudes.windows(2) {
        for cols in grid.longitudes.windows(2) {
            pairs.push(CoordinatePair::new(
                Coordinate::new(rows[0], cols[0]),
                Coordinate::new(rows[1], cols[1]),
            ));
        }
    }

    pairs
}

/// Convert a grid line set into tile diagonals.
pub fn materialize(set: &GridLineSet) -> Vec<CoordinatePair> {
    pair_boundaries(&destructure(set))
}

/// Convert a grid line set into keyed tiles at the default key precision.
pub fn materialize_tiles(set: &GridLineSet) -> Vec<Tile> {
    materialize_tiles_with_precision(set, DEFAULT_KEY_PRECISION)
}

/// Convert a grid line set into keyed tiles.
pub fn materialize_tiles_with_precision(set: &GridLineSet, precision: usize) -> Vec<Tile> {
    materialize(set)
        .into_iter()
        .map(|diagonal| Tile::new(diagonal, precision))
        .collect()
}
