//! Route assembly: turns a [`PathResult`] plus the raw query points into a
//! [`Route`] with totals, risk score, and instructions.

use hazmap_core::{EdgeId, GeoPoint, NodeId};
use hazmap_network::RoadNetwork;

use crate::cost::{CostModel, Objective};
use crate::instructions::{build_instructions, Instruction};
use crate::router::PathResult;

/// A planned route.  Built once per planning call and never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Network nodes from the snapped start to the snapped end.
    pub nodes:            Vec<NodeId>,
    /// Segments traversed between consecutive `nodes`.
    pub segments:         Vec<EdgeId>,
    /// Polyline: raw start point, every node position, raw end point.
    pub points:           Vec<GeoPoint>,
    pub total_distance_m: f64,
    pub total_time_s:     f64,
    /// Mean hazard level over `nodes`, rounded to one decimal.
    pub risk_score:       f64,
    pub instructions:     Vec<Instruction>,
    pub objective:        Objective,
    /// Search cost under `objective`; comparable only between routes
    /// planned with the same options.
    pub cost:             f64,
}

impl Route {
    pub fn instruction_texts(&self) -> Vec<&str> {
        self.instructions.iter().map(|i| i.text.as_str()).collect()
    }

    /// `true` if both endpoints snapped to the same node.
    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn end_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

/// Mean of `levels` rounded to one decimal; `0.0` when empty.
pub fn risk_score(levels: impl IntoIterator<Item = f32>) -> f64 {
    let (sum, count) = levels
        .into_iter()
        .fold((0.0f64, 0usize), |(s, n), l| (s + l as f64, n + 1));
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64 * 10.0).round() / 10.0
}

/// Build a [`Route`] for `path`, bracketed by the raw query points.
///
/// Legs along network segments take the segment's time for the model's
/// travel mode; the two connector legs (query point to snapped node) are
/// timed at the mode's average speed.
pub fn assemble_route(
    network: &RoadNetwork,
    start: GeoPoint,
    end: GeoPoint,
    path: PathResult,
    model: &CostModel,
    sample_every: usize,
) -> Route {
    let avg_speed = model.mode.average_speed_mps();

    let mut points = Vec::with_capacity(path.nodes.len() + 2);
    let mut roads: Vec<Option<&str>> = Vec::with_capacity(path.nodes.len() + 2);
    points.push(start);
    roads.push(None);
    for &id in &path.nodes {
        let node = network.node(id);
        points.push(node.pos);
        roads.push(node.road_name());
    }
    points.push(end);
    roads.push(None);

    let total_distance_m: f64 = points.windows(2).map(|w| w[0].distance_m(w[1])).sum();

    let connector_m = match (path.nodes.first(), path.nodes.last()) {
        (Some(&first), Some(&last)) => {
            start.distance_m(network.node(first).pos) + network.node(last).pos.distance_m(end)
        }
        _ => start.distance_m(end),
    };
    let network_time_s: f64 = path
        .edges
        .iter()
        .map(|&e| model.segment_time_s(network.segment(e)))
        .sum();
    let total_time_s = network_time_s + connector_m / avg_speed;

    let risk = risk_score(path.nodes.iter().map(|&id| network.node(id).hazard_level));
    let instructions = build_instructions(&points, &roads, sample_every);

    Route {
        nodes: path.nodes,
        segments: path.edges,
        points,
        total_distance_m,
        total_time_s,
        risk_score: risk,
        instructions,
        objective: model.objective,
        cost: path.cost,
    }
}
