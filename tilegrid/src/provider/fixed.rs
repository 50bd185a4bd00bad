//! In-memory grid-section provider.

use crate::coord::Coordinate;
use crate::grid::{sample_grid, GridLineSet};
use crate::provider::{GridSectionProvider, ProviderError};

/// Provider that answers every request with the same line set.
///
/// Serves the bundled sample grid for offline runs and demos.
#[derive(Debug, Clone)]
pub struct StaticGridProvider {
    lines: GridLineSet,
}

impl StaticGridProvider {
    /// Serve the given line set.
    pub fn new(lines: GridLineSet) -> Self {
        Self { lines }
    }

    /// Serve the bundled sample grid.
    pub fn sample() -> Self {
        Self::new(sample_grid())
    }
}

impl GridSectionProvider for StaticGridProvider {
    async fn fetch_grid_section(
        &self,
        _corners: [Coordinate; 2],
    ) -> Result<GridLineSet, ProviderError> {
        Ok(self.lines.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
