//! Road classification, traffic state, and lattice density enums.

use std::str::FromStr;

use crate::CoreError;

// ── RoadType ──────────────────────────────────────────────────────────────────

/// Functional road class, ordered from highest to lowest capacity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoadType {
    Highway,
    Arterial,
    Collector,
    #[default]
    Local,
    Alley,
}

impl RoadType {
    /// 0 for `Highway` up to 4 for `Alley`.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            RoadType::Highway   => 0,
            RoadType::Arterial  => 1,
            RoadType::Collector => 2,
            RoadType::Local     => 3,
            RoadType::Alley     => 4,
        }
    }

    /// Posted speed assumed when a road carries no explicit limit.
    pub fn default_speed_kmh(self) -> f64 {
        match self {
            RoadType::Highway   => 100.0,
            RoadType::Arterial  => 60.0,
            RoadType::Collector => 50.0,
            RoadType::Local     => 40.0,
            RoadType::Alley     => 20.0,
        }
    }

    pub fn default_width_m(self) -> f64 {
        match self {
            RoadType::Highway   => 24.0,
            RoadType::Arterial  => 16.0,
            RoadType::Collector => 10.0,
            RoadType::Local     => 7.0,
            RoadType::Alley     => 3.5,
        }
    }

    /// Whether two road classes may be joined by a connector segment.
    ///
    /// Classes more than two ranks apart never meet directly: a highway
    /// cannot open onto a local street or an alley, and an alley cannot
    /// open onto an arterial.
    pub fn is_compatible_with(self, other: RoadType) -> bool {
        self.rank().abs_diff(other.rank()) <= 2
    }

    /// Classes that `prefer_highways` routing favours.
    #[inline]
    pub fn is_highway_class(self) -> bool {
        matches!(self, RoadType::Highway | RoadType::Arterial)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadType::Highway   => "highway",
            RoadType::Arterial  => "arterial",
            RoadType::Collector => "collector",
            RoadType::Local     => "local",
            RoadType::Alley     => "alley",
        }
    }
}

impl std::fmt::Display for RoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "highway"   => Ok(RoadType::Highway),
            "arterial"  => Ok(RoadType::Arterial),
            "collector" => Ok(RoadType::Collector),
            "local"     => Ok(RoadType::Local),
            "alley"     => Ok(RoadType::Alley),
            other => Err(CoreError::Parse(format!("unknown road type {other:?}"))),
        }
    }
}

// ── TrafficCondition ──────────────────────────────────────────────────────────

/// Live traffic state of a segment; scales traversal cost.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrafficCondition {
    #[default]
    Smooth,
    Slow,
    Congested,
    /// Heavily penalised but still traversable.
    Blocked,
}

impl TrafficCondition {
    /// Multiplier applied to a segment's base cost.
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            TrafficCondition::Smooth    => 1.0,
            TrafficCondition::Slow      => 1.5,
            TrafficCondition::Congested => 2.0,
            TrafficCondition::Blocked   => 10.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficCondition::Smooth    => "smooth",
            TrafficCondition::Slow      => "slow",
            TrafficCondition::Congested => "congested",
            TrafficCondition::Blocked   => "blocked",
        }
    }
}

impl FromStr for TrafficCondition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smooth"    => Ok(TrafficCondition::Smooth),
            "slow"      => Ok(TrafficCondition::Slow),
            "congested" => Ok(TrafficCondition::Congested),
            "blocked"   => Ok(TrafficCondition::Blocked),
            other => Err(CoreError::Parse(format!("unknown traffic condition {other:?}"))),
        }
    }
}

// ── DensityClass ──────────────────────────────────────────────────────────────

/// Sampling density of a generated lattice region.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DensityClass {
    High,
    #[default]
    Medium,
    Low,
}

impl DensityClass {
    /// Lattice step in metres.
    pub fn resolution_m(self) -> f64 {
        match self {
            DensityClass::High   => 50.0,
            DensityClass::Medium => 100.0,
            DensityClass::Low    => 200.0,
        }
    }
}

impl FromStr for DensityClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high"   => Ok(DensityClass::High),
            "medium" => Ok(DensityClass::Medium),
            "low"    => Ok(DensityClass::Low),
            other => Err(CoreError::Parse(format!("unknown density class {other:?}"))),
        }
    }
}
