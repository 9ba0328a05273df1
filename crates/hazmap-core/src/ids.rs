//! Strongly typed identifiers.
//!
//! `NodeId` and `EdgeId` are dense indices into the network's node and
//! segment arrays, assigned in insertion order.  `CoordKey` is the
//! coordinate-derived identity of a node: two points that quantize to the
//! same key are the same road node, which is how overlapping roads and
//! lattices merge during generation.

use std::fmt;

use crate::GeoPoint;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road segment.
    pub struct EdgeId(u32);
}

// ── CoordKey ──────────────────────────────────────────────────────────────────

/// Coordinates are quantized to 5 decimal places (~1.1 m of latitude).
const KEY_SCALE: f64 = 100_000.0;

/// Coordinate-derived node identity: latitude and longitude quantized to
/// five decimal places.
///
/// Points closer than the quantum may still land in different cells when
/// they straddle a rounding boundary; merging is by key equality only.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordKey {
    pub lat_q: i64,
    pub lon_q: i64,
}

impl CoordKey {
    pub fn of(pos: GeoPoint) -> Self {
        Self {
            lat_q: (pos.lat * KEY_SCALE).round() as i64,
            lon_q: (pos.lon * KEY_SCALE).round() as i64,
        }
    }

    /// The cell centre this key was quantized to.
    pub fn center(self) -> GeoPoint {
        GeoPoint::new(self.lat_q as f64 / KEY_SCALE, self.lon_q as f64 / KEY_SCALE)
    }
}

impl fmt::Display for CoordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.center();
        write!(f, "{:.5}_{:.5}", c.lat, c.lon)
    }
}
