//! Viewport change detection.
//!
//! Decides whether a new map viewport is close enough to warrant fetching a
//! fresh grid section.
//!
//! # Heuristic
//!
//! ```text
//! lat_term = |sin(ne.lng) - sin(sw.lng)|
//! lng_term = |sin(ne.lat) - sin(sw.lat)|
//!
//! refresh  ⇔  lat_term < threshold  OR  lng_term < threshold
//! ```
//!
//! The degree values go straight into `sin` and each term is named after the
//! opposite axis from the one it reads. Both quirks are kept intentionally
//! and confined to [`sine_deltas`]. The result is a cheap, bounded proximity
//! measure tuned by the threshold, not a geodesic distance. Because `sin` is
//! periodic, some very large spans also pass.

use std::fmt;

use super::ViewportBounds;
use crate::coord::Coordinate;

/// Default sine-delta threshold below which a viewport is refreshed.
pub const DEFAULT_SINE_DELTA_THRESHOLD: f64 = 0.0004;

/// The two proximity terms computed for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineDeltas {
    /// `|sin(ne.lng) - sin(sw.lng)|`
    pub lat: f64,
    /// `|sin(ne.lat) - sin(sw.lat)|`
    pub lng: f64,
}

impl SineDeltas {
    /// True when either term is strictly below `threshold`.
    #[inline]
    pub fn either_below(&self, threshold: f64) -> bool {
        self.lat < threshold || self.lng < threshold
    }
}

impl fmt::Display for SineDeltas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat={:.6} lng={:.6}", self.lat, self.lng)
    }
}

/// Compute the proximity terms for a south-west/north-east corner pair.
///
/// `lat` reads longitudes and `lng` reads latitudes. Correcting the
/// cross-wiring means swapping the two field initializers here.
#[inline]
pub fn sine_deltas(south_west: Coordinate, north_east: Coordinate) -> SineDeltas {
    SineDeltas {
        lat: (north_east.lng.sin() - south_west.lng.sin()).abs(),
        lng: (north_east.lat.sin() - south_west.lat.sin()).abs(),
    }
}

/// Outcome of evaluating a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportDecision {
    /// Fetch the grid section bounded by `[south_west, north_east]`.
    Refresh([Coordinate; 2]),

    /// Neither term passed the threshold; keep the current tiles.
    RangeTooBig(SineDeltas),
}

impl ViewportDecision {
    /// True for [`ViewportDecision::Refresh`].
    pub fn is_refresh(&self) -> bool {
        matches!(self, ViewportDecision::Refresh(_))
    }
}

/// Stateless viewport change detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportChangeDetector {
    threshold: f64,
}

impl Default for ViewportChangeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SINE_DELTA_THRESHOLD)
    }
}

impl ViewportChangeDetector {
    /// Create a detector with the given sine-delta threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluate a viewport.
    pub fn evaluate(&self, bounds: &ViewportBounds) -> ViewportDecision {
        let deltas = sine_deltas(bounds.south_west, bounds.north_east);
        if deltas.either_below(self.threshold) {
            ViewportDecision::Refresh(bounds.corners())
        } else {
            ViewportDecision::RangeTooBig(deltas)
        }
    }
}
