//! Line set → structural grid coordinates.

use super::lines::GridLineSet;

/// The distinct row and column boundaries of a grid section.
///
/// Both vectors are sorted ascending (south → north, west → east) and free
/// of exact duplicates. Near-duplicates are kept; they later show up as thin
/// tiles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridStructure {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
}

impl GridStructure {
    /// Number of tiles the structure describes.
    pub fn tile_count(&self) -> usize {
        self.latitudes.len().saturating_sub(1) * self.longitudes.len().saturating_sub(1)
    }
}

/// Extract row and column boundaries from a line set.
///
/// East-west lines contribute their start latitude, north-south lines their
/// start longitude.
pub fn destructure(set: &GridLineSet) -> GridStructure {
    let mut latitudes = Vec::new();
    let mut longitudes = Vec::new();

    for line in &set.lines {
        if line.is_constant_latitude() {
            latitudes.push(line.start.lat);
        } else {
            longitudes.push(line.start.lng);
        }
    }

    GridStructure {
        latitudes: sorted_distinct(latitudes),
        longitudes: sorted_distinct(longitudes),
    }
}

fn sorted_distinct(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}
