//! TileGrid - selectable grid tiles for a map viewport
//!
//! This library turns grid-section boundary data into rectangular map tiles
//! and keeps a tile overlay in step with a moving map:
//!
//! - [`viewport`] decides when a viewport change warrants a new fetch
//! - [`provider`] fetches grid sections (what3words, or a static grid)
//! - [`grid`] converts boundary lines into keyed tiles
//! - [`map`] owns the tile set and selection and produces tile shapes

pub mod app;
pub mod config;
pub mod coord;
pub mod grid;
pub mod logging;
pub mod map;
pub mod provider;
pub mod viewport;
