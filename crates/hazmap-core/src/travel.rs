//! Travel mode enum shared by the routing and output crates.

use std::str::FromStr;

use crate::CoreError;

/// How the traveller moves along a route.
///
/// Only `Driving` uses the per-segment nominal travel times derived from speed
/// limits.  The other modes, and every connector leg that has no segment,
/// are timed from distance and the mode's average speed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Cycling,
}

impl TravelMode {
    /// Average door-to-door speed in m/s.
    ///
    /// | Mode    | Speed            |
    /// |---------|------------------|
    /// | Driving | 8.33 m/s (30 km/h urban average) |
    /// | Walking | 1.4 m/s          |
    /// | Cycling | 4.2 m/s          |
    pub fn average_speed_mps(self) -> f64 {
        match self {
            TravelMode::Driving => 30.0 / 3.6,
            TravelMode::Walking => 1.4,
            TravelMode::Cycling => 4.2,
        }
    }

    /// `true` if segment speed limits apply to this mode.
    #[inline]
    pub fn uses_speed_limits(self) -> bool {
        matches!(self, TravelMode::Driving)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" | "car" => Ok(TravelMode::Driving),
            "walking" | "walk" => Ok(TravelMode::Walking),
            "cycling" | "bike" => Ok(TravelMode::Cycling),
            other => Err(CoreError::Parse(format!("unknown travel mode {other:?}"))),
        }
    }
}
