//! Grid materialization.
//!
//! Turns a grid section (a set of boundary lines) into an ordered list of
//! rectangular tiles, each identified by a key derived from its south-west
//! corner.
//!
//! # Pipeline
//!
//! ```text
//! GridLineSet ──destructure──► GridStructure ──pair_boundaries──► Vec<CoordinatePair>
//!                                                                      │
//!                                                              tile_key│
//!                                                                      ▼
//!                                                                  Vec<Tile>
//! ```

mod destructure;
mod key;
mod lines;
mod materialize;

pub use destructure::{destructure, GridStructure};
pub use key::{tile_key, tile_key_with_precision, TileKey, DEFAULT_KEY_PRECISION};
pub use lines::{sample_grid, GridLine, GridLineSet};
pub use materialize::{
    materialize, materialize_tiles, materialize_tiles_with_precision, pair_boundaries, Tile,
};
