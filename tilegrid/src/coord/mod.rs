//! Geographic coordinates.
//!
//! Provides the latitude/longitude types shared by the viewport detector,
//! the grid materializer and the grid-section providers.

mod types;

pub use types::{Coordinate, CoordError, CoordinatePair, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};
