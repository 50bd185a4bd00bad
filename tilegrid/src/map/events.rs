//! Tile map notifications.

use crate::grid::TileKey;
use crate::viewport::SineDeltas;

/// Broadcast whenever the tile map's observable state changes or a refresh
/// is skipped or fails.
#[derive(Debug, Clone, PartialEq)]
pub enum TileMapEvent {
    /// The tile set was replaced by the result of fetch `sequence`.
    TilesReplaced { sequence: u64, count: usize },

    /// The selection changed.
    SelectionChanged { key: Option<TileKey> },

    /// Fetch `sequence` failed; the previous tiles remain.
    RefreshFailed { sequence: u64, reason: String },

    /// Fetch `sequence` resolved after a newer one was dispatched and was
    /// discarded.
    RefreshSuperseded { sequence: u64, latest: u64 },

    /// The viewport was too large to refresh.
    RangeTooBig { deltas: SineDeltas },
}
