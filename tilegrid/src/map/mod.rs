//! Tile map: the stateful side of the grid overlay.
//!
//! A [`TileMap`] receives viewport notifications from the map surface,
//! fetches grid sections through a [`GridSectionProvider`], and exposes the
//! resulting tiles as [`TileShape`]s plus a selection driven by tap
//! callbacks.
//!
//! # Example
//!
//! ```ignore
//! use tilegrid::map::TileMap;
//! use tilegrid::provider::StaticGridProvider;
//!
//! let map = TileMap::with_defaults(StaticGridProvider::sample());
//! if let Some(handle) = map.on_viewport_change(bounds).into_handle() {
//!     handle.join().await?;
//! }
//! for shape in map.shapes() {
//!     // draw shape.ring filled with shape.fill
//! }
//! ```
//!
//! [`GridSectionProvider`]: crate::provider::GridSectionProvider

mod config;
mod controller;
mod events;
mod shape;
mod state;

pub use config::{StaleResultPolicy, TileMapConfig};
pub use controller::{RefreshHandle, RefreshOutcome, TileMap, ViewportOutcome};
pub use events::TileMapEvent;
pub use shape::{FillColor, TileShape, SELECTED_FILL, UNSELECTED_FILL};
pub use state::TileMapState;
