//! Grid boundary line sets.
//!
//! A grid-section provider describes the grid as a flat list of line
//! segments. Lines of constant latitude bound tile rows; lines of constant
//! longitude bound tile columns.
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "lines": [
//!     { "start": { "lat": 51.5316, "lng": -0.2890 },
//!       "end":   { "lat": 51.5316, "lng": -0.2888 } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::coord::Coordinate;

/// One boundary segment of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl GridLine {
    /// Create a line from its end points.
    pub const fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    /// True when the line runs east-west.
    ///
    /// Lines that are neither exactly horizontal nor vertical are classified
    /// by their dominant extent. A zero-length line counts as constant
    /// latitude.
    pub fn is_constant_latitude(&self) -> bool {
        let lat_extent = (self.end.lat - self.start.lat).abs();
        let lng_extent = (self.end.lng - self.start.lng).abs();
        lat_extent <= lng_extent
    }
}

/// A grid section as delivered by a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLineSet {
    pub lines: Vec<GridLine>,
}

impl GridLineSet {
    /// Wrap a list of lines.
    pub fn new(lines: Vec<GridLine>) -> Self {
        Self { lines }
    }

    /// Parse a grid section from its JSON representation.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Build a regular grid of `rows` × `cols` tiles anchored at `south_west`.
    ///
    /// Produces `rows + 1` east-west lines and `cols + 1` north-south lines
    /// spanning the whole section, the same shape a grid-section service
    /// returns.
    pub fn regular(
        south_west: Coordinate,
        rows: usize,
        cols: usize,
        lat_step: f64,
        lng_step: f64,
    ) -> Self {
        let west = south_west.lng;
        let east = south_west.lng + cols as f64 * lng_step;
        let south = south_west.lat;
        let north = south_west.lat + rows as f64 * lat_step;

        let rows_iter = (0..=rows).map(|i| {
            let lat = south + i as f64 * lat_step;
            GridLine::new(Coordinate::new(lat, west), Coordinate::new(lat, east))
        });
        let cols_iter = (0..=cols).map(|j| {
            let lng = west + j as f64 * lng_step;
            GridLine::new(Coordinate::new(south, lng), Coordinate::new(north, lng))
        });

        Self {
            lines: rows_iter.chain(cols_iter).collect(),
        }
    }

    /// Number of lines in the section.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the section has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Built-in grid around the default camera position (north-west London).
///
/// Used to seed the tile map before the first viewport refresh.
pub fn sample_grid() -> GridLineSet {
    GridLineSet::regular(
        Coordinate::new(51.531594, -0.288986),
        4,
        4,
        0.000027,
        0.000043,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        let horizontal = GridLine::new(Coordinate::new(1.0, 0.0), Coordinate::new(1.0, 5.0));
        let vertical = GridLine::new(Coordinate::new(0.0, 2.0), Coordinate::new(5.0, 2.0));
        let point = GridLine::new(Coordinate::new(3.0, 3.0), Coordinate::new(3.0, 3.0));

        assert!(horizontal.is_constant_latitude());
        assert!(!vertical.is_constant_latitude());
        assert!(point.is_constant_latitude());
    }

    #[test]
    fn test_from_json() {
        let json = br#"{
            "lines": [
                {"start": {"lat": 0.0, "lng": 0.0}, "end": {"lat": 0.0, "lng": 1.0}},
                {"start": {"lat": 0.0, "lng": 0.0}, "end": {"lat": 1.0, "lng": 0.0}}
            ]
        }"#;

        let set = GridLineSet::from_json(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.lines[0].end, Coordinate::new(0.0, 1.0));
    }

    #[test]
    fn test_from_json_rejects_missing_lines() {
        assert!(GridLineSet::from_json(br#"{"grid": []}"#).is_err());
    }

    #[test]
    fn test_regular_line_count() {
        let set = GridLineSet::regular(Coordinate::new(0.0, 0.0), 2, 3, 1.0, 1.0);
        // 3 east-west lines + 4 north-south lines
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_sample_grid_not_empty() {
        assert!(!sample_grid().is_empty());
    }
}
