//! Tile identity.
//!
//! A tile is identified by its south-west corner, rounded to a fixed number
//! of decimal places and rendered as text: latitude immediately followed by
//! longitude. At the default precision of 5 digits the south-west corner
//! `(51.531622754, -0.288922980)` yields the key `51.53162-0.28892`.
//!
//! Tiles whose south-west corners agree at that precision share a key. The
//! selection model relies on this scheme as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::CoordinatePair;

/// Decimal places kept when deriving a tile key.
pub const DEFAULT_KEY_PRECISION: usize = 5;

/// String identity of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileKey(String);

impl TileKey {
    /// Wrap an existing key string (e.g. one received from a tap callback).
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TileKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for TileKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TileKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<str> for TileKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TileKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derive the key of a tile at the default precision.
#[inline]
pub fn tile_key(pair: &CoordinatePair) -> TileKey {
    tile_key_with_precision(pair, DEFAULT_KEY_PRECISION)
}

/// Derive the key of a tile, rounding the south-west corner to `precision`
/// decimal places.
pub fn tile_key_with_precision(pair: &CoordinatePair, precision: usize) -> TileKey {
    let sw = pair.south_west;
    TileKey(format!(
        "{}{}",
        fixed(sw.lat, precision),
        fixed(sw.lng, precision)
    ))
}

/// Decimal places that hold the exact expansion of any finite `f64`.
const EXACT_DIGITS: usize = 1100;

/// Fixed-point rendering with exact halfway values rounded away from zero.
///
/// Negative inputs keep their sign even when they round to zero, so
/// `-0.000001` renders as `-0.00000`; `-0.0` renders unsigned.
fn fixed(value: f64, precision: usize) -> String {
    let magnitude = value.abs();
    let digits = round_tie_up(magnitude, precision)
        .unwrap_or_else(|| format!("{:.*}", precision, magnitude));
    if value < 0.0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// Rounded text when `magnitude` sits exactly halfway between two
/// candidates at `precision` places; `None` otherwise.
fn round_tie_up(magnitude: f64, precision: usize) -> Option<String> {
    // A tie is exact one place further, so it must print a trailing 5 there.
    if !magnitude.is_finite() || !format!("{:.*}", precision + 1, magnitude).ends_with('5') {
        return None;
    }

    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let cut = exact.find('.')? + 1 + precision;
    let (head, tail) = exact.split_at(cut);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    is_tie.then(|| increment_last_digit(head.trim_end_matches('.')))
}

/// Add one unit in the last place of a decimal string.
fn increment_last_digit(digits: &str) -> String {
    let mut chars: Vec<char> = digits.chars().collect();
    for i in (0..chars.len()).rev() {
        match chars[i] {
            '.' => continue,
            '9' => chars[i] = '0',
            d => {
                chars[i] = (d as u8 + 1) as char;
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}
