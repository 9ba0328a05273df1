//! Plain data row types written by route writers.

use hazmap_network::RoadNetwork;
use hazmap_routing::Route;

/// One vertex of a route polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePointRow {
    pub variant:      String,
    pub seq:          u32,
    pub lat:          f64,
    pub lon:          f64,
    /// `None` for the raw start and end query points.
    pub node_id:      Option<u32>,
    pub hazard_level: f32,
}

impl RoutePointRow {
    /// Rows for every point of `route`: the start point, each node, the end
    /// point.
    pub fn from_route(variant: &str, route: &Route, network: &RoadNetwork) -> Vec<Self> {
        let last = route.points.len().saturating_sub(1);
        route
            .points
            .iter()
            .enumerate()
            .map(|(seq, p)| {
                let node = match seq {
                    0 => None,
                    s if s == last => None,
                    s => route.nodes.get(s - 1).copied(),
                };
                RoutePointRow {
                    variant:      variant.to_string(),
                    seq:          seq as u32,
                    lat:          p.lat,
                    lon:          p.lon,
                    node_id:      node.map(|n| n.0),
                    hazard_level: node.map_or(0.0, |n| network.node(n).hazard_level),
                }
            })
            .collect()
    }
}

/// Totals for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummaryRow {
    pub variant:           String,
    pub distance_m:        f64,
    pub time_s:            f64,
    pub risk_score:        f64,
    pub instruction_count: u32,
}

impl RouteSummaryRow {
    pub fn from_route(variant: &str, route: &Route) -> Self {
        Self {
            variant:           variant.to_string(),
            distance_m:        route.total_distance_m,
            time_s:            route.total_time_s,
            risk_score:        route.risk_score,
            instruction_count: route.instructions.len() as u32,
        }
    }
}
