//! Edge costs and search heuristics.
//!
//! # Cost formula
//!
//! | Objective  | Base cost of a segment `u → v`                      |
//! |------------|-----------------------------------------------------|
//! | `Distance` | `distance_m`                                        |
//! | `Time`     | `travel_time_s × 10`                                |
//! | `Safety`   | `distance_m + hazard(v) × 1000`                     |
//!
//! `avoid_hazards` adds the same hazard penalty to the other two objectives.
//! `prefer_highways` scales highway-class segments by 0.8.  The result is
//! multiplied by the segment's traffic factor (1.0 / 1.5 / 2.0 / 10.0).
//!
//! Costs are unitless and only comparable within one objective.

use std::fmt;

use hazmap_core::{EdgeId, GeoPoint, TravelMode};
use hazmap_network::{RoadNetwork, RoadSegment};

/// Weight applied to travel seconds under [`Objective::Time`].
pub const TIME_COST_SCALE: f64 = 10.0;

/// Cost added per hazard level of the entered node.
pub const HAZARD_PENALTY_PER_LEVEL: f64 = 1000.0;

/// Multiplier on highway and arterial segments when highways are preferred.
pub const HIGHWAY_PREFERENCE_FACTOR: f64 = 0.8;

// ── Objective ─────────────────────────────────────────────────────────────────

/// What the search minimises.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", from = "String"))]
pub enum Objective {
    Time,
    #[default]
    Distance,
    Safety,
}

impl Objective {
    pub fn as_str(self) -> &'static str {
        match self {
            Objective::Time     => "time",
            Objective::Distance => "distance",
            Objective::Safety   => "safety",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse: unknown names fall back to `Distance` with a warning.
impl From<&str> for Objective {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "fastest" => Objective::Time,
            "distance" | "shortest" => Objective::Distance,
            "safety" | "safest" => Objective::Safety,
            other => {
                log::warn!("unknown objective {other:?}; using distance");
                Objective::Distance
            }
        }
    }
}

impl From<String> for Objective {
    fn from(s: String) -> Self {
        Objective::from(s.as_str())
    }
}

// ── HeuristicPolicy ───────────────────────────────────────────────────────────

/// How A* estimates the remaining cost to the goal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HeuristicPolicy {
    /// Raw haversine metres to the goal.  Optimal for `Distance` only; may
    /// overestimate the `Time` cost scale or the 0.8 highway discount.
    Haversine,
    /// Haversine metres times the cheapest possible cost per metre under the
    /// active model.  Never overestimates, so every objective stays optimal.
    #[default]
    Admissible,
    /// No estimate; the search degenerates to Dijkstra.
    Zero,
}

// ── CostModel ─────────────────────────────────────────────────────────────────

/// Resolved cost parameters for one search.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CostModel {
    pub objective:       Objective,
    pub avoid_hazards:   bool,
    pub prefer_highways: bool,
    pub mode:            TravelMode,
    pub heuristic:       HeuristicPolicy,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            objective:       Objective::Distance,
            avoid_hazards:   false,
            prefer_highways: false,
            mode:            TravelMode::Driving,
            heuristic:       HeuristicPolicy::Admissible,
        }
    }
}

impl CostModel {
    pub fn new(objective: Objective) -> Self {
        Self { objective, ..Self::default() }
    }

    /// Seconds to traverse `seg` in this model's travel mode.
    #[inline]
    pub fn segment_time_s(&self, seg: &RoadSegment) -> f64 {
        if self.mode.uses_speed_limits() {
            seg.travel_time_s
        } else {
            seg.distance_m / self.mode.average_speed_mps()
        }
    }

    /// Cost of traversing `edge`.  The hazard term uses the node being
    /// entered.
    pub fn edge_cost(&self, network: &RoadNetwork, edge: EdgeId) -> f64 {
        let seg = network.segment(edge);
        let penalty = network.node(seg.to).hazard_level as f64 * HAZARD_PENALTY_PER_LEVEL;

        let mut cost = match self.objective {
            Objective::Distance => seg.distance_m,
            Objective::Time     => self.segment_time_s(seg) * TIME_COST_SCALE,
            Objective::Safety   => seg.distance_m + penalty,
        };
        if self.avoid_hazards && self.objective != Objective::Safety {
            cost += penalty;
        }
        if self.prefer_highways && seg.road_type.is_highway_class() {
            cost *= HIGHWAY_PREFERENCE_FACTOR;
        }
        cost * seg.traffic.factor()
    }

    /// Lower bound on cost per metre of straight-line distance, given the
    /// fastest segment in `network`.
    pub fn min_cost_per_meter(&self, network: &RoadNetwork) -> f64 {
        let per_meter = match self.objective {
            Objective::Distance | Objective::Safety => 1.0,
            Objective::Time => {
                let speed = if self.mode.uses_speed_limits() {
                    network.max_segment_speed_mps()
                } else {
                    self.mode.average_speed_mps()
                };
                if speed > 0.0 { TIME_COST_SCALE / speed } else { 0.0 }
            }
        };
        if self.prefer_highways {
            per_meter * HIGHWAY_PREFERENCE_FACTOR
        } else {
            per_meter
        }
    }

    /// Heuristic estimate from `pos` to `goal`; `per_meter` comes from
    /// [`min_cost_per_meter`](Self::min_cost_per_meter), computed once per
    /// search.
    #[inline]
    pub fn estimate(&self, pos: GeoPoint, goal: GeoPoint, per_meter: f64) -> f64 {
        match self.heuristic {
            HeuristicPolicy::Haversine  => pos.distance_m(goal),
            HeuristicPolicy::Admissible => pos.distance_m(goal) * per_meter,
            HeuristicPolicy::Zero       => 0.0,
        }
    }
}
