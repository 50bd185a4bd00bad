//! Map viewport handling.
//!
//! The map surface reports its visible region as a south-west/north-east
//! corner pair. The [`ViewportChangeDetector`] decides whether that region
//! should trigger a grid-section fetch.

mod detector;

pub use detector::{
    sine_deltas, SineDeltas, ViewportChangeDetector, ViewportDecision,
    DEFAULT_SINE_DELTA_THRESHOLD,
};

use std::fmt;

use crate::coord::Coordinate;

/// The visible map region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl ViewportBounds {
    /// Create bounds from the two corners reported by the map surface.
    pub const fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// The corners in fetch order, `[south_west, north_east]`.
    #[inline]
    pub fn corners(&self) -> [Coordinate; 2] {
        [self.south_west, self.north_east]
    }
}

impl fmt::Display for ViewportBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sw({}) ne({})", self.south_west, self.north_east)
    }
}
