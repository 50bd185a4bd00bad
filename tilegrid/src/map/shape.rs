//! Declarative render model for tiles.
//!
//! The map surface draws one polygon per [`TileShape`]; this crate never
//! renders anything itself.

use std::fmt;

use serde::Serialize;

use crate::coord::Coordinate;
use crate::grid::{Tile, TileKey};

/// RGBA fill colour, alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl FillColor {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Fill for the selected tile (translucent red).
pub const SELECTED_FILL: FillColor = FillColor::rgba(255, 0, 0, 0.2);

/// Fill for every other tile (transparent).
pub const UNSELECTED_FILL: FillColor = FillColor::rgba(0, 0, 0, 0.0);

/// One tappable tile polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileShape {
    /// Identity passed back through the selection callback on tap.
    pub key: TileKey,
    /// Corners in drawing order: sw, se, ne, nw.
    pub ring: [Coordinate; 4],
    pub is_selected: bool,
    pub fill: FillColor,
}

impl TileShape {
    /// Build the shape for `tile` given the current selection.
    pub fn for_tile(tile: &Tile, selected: Option<&TileKey>) -> Self {
        let is_selected = selected == Some(&tile.key);
        Self {
            key: tile.key.clone(),
            ring: tile.diagonal.ring(),
            is_selected,
            fill: if is_selected {
                SELECTED_FILL
            } else {
                UNSELECTED_FILL
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::CoordinatePair;

    fn tile() -> Tile {
        Tile::new(
            CoordinatePair::new(Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)),
            5,
        )
    }

    #[test]
    fn test_fill_display() {
        assert_eq!(SELECTED_FILL.to_string(), "rgba(255,0,0,0.2)");
        assert_eq!(UNSELECTED_FILL.to_string(), "rgba(0,0,0,0)");
    }

    #[test]
    fn test_selected_shape() {
        let tile = tile();
        let shape = TileShape::for_tile(&tile, Some(&tile.key));
        assert!(shape.is_selected);
        assert_eq!(shape.fill, SELECTED_FILL);
        assert_eq!(shape.ring[2], Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn test_unselected_shape() {
        let other = TileKey::new("elsewhere");
        let shape = TileShape::for_tile(&tile(), Some(&other));
        assert!(!shape.is_selected);
        assert_eq!(shape.fill, UNSELECTED_FILL);

        let shape = TileShape::for_tile(&tile(), None);
        assert!(!shape.is_selected);
    }
}
