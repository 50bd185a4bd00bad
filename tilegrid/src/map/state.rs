//! Observable tile map state.

use crate::grid::{Tile, TileKey};

use super::shape::TileShape;

/// The tile set and selection owned by a tile map.
///
/// The tile set is only ever replaced as a whole. The selection is
/// independent of it: a selected key survives refreshes even when no tile
/// carries it anymore.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileMapState {
    pub tiles: Vec<Tile>,
    pub selected: Option<TileKey>,
    /// Sequence number of the fetch that produced `tiles` (0 = initial set).
    pub applied_sequence: u64,
}

impl TileMapState {
    /// Render model for the current state.
    pub fn shapes(&self) -> Vec<TileShape> {
        self.tiles
            .iter()
            .map(|tile| TileShape::for_tile(tile, self.selected.as_ref()))
            .collect()
    }

    /// The tile carrying `key`, if present.
    ///
    /// With colliding keys the first tile in grid order is returned.
    pub fn tile(&self, key: &TileKey) -> Option<&Tile> {
        self.tiles.iter().find(|t| &t.key == key)
    }

    /// The currently selected tile, if the selection matches one.
    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected.as_ref().and_then(|key| self.tile(key))
    }
}
