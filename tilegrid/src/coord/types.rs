//! Geographic coordinate types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LNG: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LNG: f64 = 180.0;

/// Errors produced when building coordinates from user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude outside [-90, 90].
    #[error("Invalid latitude: {0} (expected -90.0 to 90.0)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("Invalid longitude: {0} (expected -180.0 to 180.0)")]
    InvalidLongitude(f64),

    /// Input text could not be parsed as `lat,lng`.
    #[error("Cannot parse coordinate '{0}' (expected LAT,LNG)")]
    Parse(String),
}

/// A latitude/longitude pair in degrees.
///
/// Field names match the grid-section wire format (`{"lat": .., "lng": ..}`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    ///
    /// Values coming from the map surface or the grid provider are trusted
    /// as-is; use [`Coordinate::validated`] for user input.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a coordinate, rejecting out-of-range values.
    pub fn validated(lat: f64, lng: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LNG..=MAX_LNG).contains(&lng) {
            return Err(CoordError::InvalidLongitude(lng));
        }
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CoordError::Parse(s.to_string());

        let (lat, lng) = s.split_once(',').ok_or_else(parse_err)?;
        let lat: f64 = lat.trim().parse().map_err(|_| parse_err())?;
        let lng: f64 = lng.trim().parse().map_err(|_| parse_err())?;
        Self::validated(lat, lng)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// The south-west and north-east corners of one axis-aligned tile.
///
/// Also called the tile's "diagonal". Nothing enforces `south_west <=
/// north_east`; reversed or collapsed pairs are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl CoordinatePair {
    /// Create a pair from its two corners.
    #[inline]
    pub const fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// The pair as a two-element array, `[south_west, north_east]`.
    #[inline]
    pub fn as_array(&self) -> [Coordinate; 2] {
        [self.south_west, self.north_east]
    }

    /// The four polygon corners in drawing order: sw, se, ne, nw.
    pub fn ring(&self) -> [Coordinate; 4] {
        let sw = self.south_west;
        let ne = self.north_east;
        [
            sw,
            Coordinate::new(sw.lat, ne.lng),
            ne,
            Coordinate::new(ne.lat, sw.lng),
        ]
    }
}

impl From<[Coordinate; 2]> for CoordinatePair {
    fn from([south_west, north_east]: [Coordinate; 2]) -> Self {
        Self::new(south_west, north_east)
    }
}
