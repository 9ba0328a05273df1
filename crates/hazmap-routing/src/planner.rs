//! Point-to-point planning: snap, search, assemble.

use hazmap_core::{GeoPoint, NodeId, TravelMode};
use hazmap_network::RoadNetwork;

use crate::cost::{CostModel, HeuristicPolicy, Objective};
use crate::route::{assemble_route, Route};
use crate::router::{AStarRouter, Router};
use crate::{RouteError, RouteResult};

/// Snaps farther than this still succeed but are logged.
const SNAP_WARN_M: f64 = 200.0;

// ── Options ───────────────────────────────────────────────────────────────────

/// Per-request planning options.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteOptions {
    pub optimize_for:         Objective,
    /// Add the hazard penalty under `Time` and `Distance` as well.
    pub avoid_hazards:        bool,
    /// Discount highway and arterial segments.
    pub prefer_highways:      bool,
    pub mode:                 TravelMode,
    pub heuristic:            HeuristicPolicy,
    /// Query points farther than this from every node are rejected.
    pub max_snap_distance_m:  f64,
    /// Emit a "continue straight" reminder every N points; `0` for turns only.
    pub instruction_interval: usize,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            optimize_for:         Objective::Distance,
            avoid_hazards:        false,
            prefer_highways:      false,
            mode:                 TravelMode::Driving,
            heuristic:            HeuristicPolicy::Admissible,
            max_snap_distance_m:  1_000.0,
            instruction_interval: 0,
        }
    }
}

impl RouteOptions {
    pub fn optimize_for(objective: Objective) -> Self {
        Self { optimize_for: objective, ..Self::default() }
    }

    pub fn cost_model(&self) -> CostModel {
        CostModel {
            objective:       self.optimize_for,
            avoid_hazards:   self.avoid_hazards,
            prefer_highways: self.prefer_highways,
            mode:            self.mode,
            heuristic:       self.heuristic,
        }
    }
}

/// Input for [`RoutePlanner::plan_variants`].
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VariantRequest {
    /// Turns on hazard avoidance for every variant.
    pub prefer_safety:   bool,
    pub prefer_highways: bool,
    pub mode:            TravelMode,
}

/// The three standard alternatives for one trip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteVariants {
    /// Planned with [`Objective::Safety`].
    pub safest:   Route,
    /// Planned with [`Objective::Time`].
    pub fastest:  Route,
    /// Planned with [`Objective::Distance`].
    pub balanced: Route,
}

impl RouteVariants {
    /// `(name, route)` pairs in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Route)> {
        [
            ("safest", &self.safest),
            ("fastest", &self.fastest),
            ("balanced", &self.balanced),
        ]
        .into_iter()
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Plans routes over a borrowed network.
///
/// The planner holds no per-search state, so one instance can serve
/// concurrent callers.  Hazard or traffic updates need `&mut RoadNetwork`
/// and therefore cannot overlap with planning.
pub struct RoutePlanner<'a, R = AStarRouter> {
    network: &'a RoadNetwork,
    router:  R,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network, router: AStarRouter }
    }
}

impl<'a, R: Router> RoutePlanner<'a, R> {
    pub fn with_router(network: &'a RoadNetwork, router: R) -> Self {
        Self { network, router }
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    /// Nearest node to `point`, or an error if the network is empty or the
    /// node lies farther than `max_distance_m`.
    pub fn snap(&self, point: GeoPoint, max_distance_m: f64) -> RouteResult<(NodeId, f64)> {
        GeoPoint::try_new(point.lat, point.lon)?;
        let (id, distance_m) = self
            .network
            .nearest_node(point)
            .ok_or(RouteError::EmptyNetwork)?;
        if distance_m > max_distance_m {
            return Err(RouteError::Unmappable { point, distance_m, max_m: max_distance_m });
        }
        if distance_m > SNAP_WARN_M {
            log::warn!("{point} snapped to {id} {distance_m:.0} m away");
        }
        Ok((id, distance_m))
    }

    /// Plan a route between two arbitrary points.
    pub fn plan_route(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        options: &RouteOptions,
    ) -> RouteResult<Route> {
        let (from, _) = self.snap(start, options.max_snap_distance_m)?;
        let (to, _) = self.snap(end, options.max_snap_distance_m)?;
        let model = options.cost_model();
        let path = self.router.find_path(self.network, from, to, &model)?;
        Ok(assemble_route(
            self.network,
            start,
            end,
            path,
            &model,
            options.instruction_interval,
        ))
    }

    /// Plan between two known nodes; the route's end points are the node
    /// positions, so there are no connector legs.
    pub fn plan_between_nodes(
        &self,
        from: NodeId,
        to: NodeId,
        options: &RouteOptions,
    ) -> RouteResult<Route> {
        let start = self.network.get_node(from)?.pos;
        let end = self.network.get_node(to)?.pos;
        let model = options.cost_model();
        let path = self.router.find_path(self.network, from, to, &model)?;
        Ok(assemble_route(
            self.network,
            start,
            end,
            path,
            &model,
            options.instruction_interval,
        ))
    }

    /// Plan the safest, fastest, and balanced routes for one trip.
    pub fn plan_variants(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        request: &VariantRequest,
    ) -> RouteResult<RouteVariants> {
        let options = |objective| RouteOptions {
            optimize_for:    objective,
            avoid_hazards:   request.prefer_safety,
            prefer_highways: request.prefer_highways,
            mode:            request.mode,
            ..RouteOptions::default()
        };
        let safe = options(Objective::Safety);
        let fast = options(Objective::Time);
        let short = options(Objective::Distance);

        #[cfg(not(feature = "parallel"))]
        let (safest, fastest, balanced) = (
            self.plan_route(start, end, &safe),
            self.plan_route(start, end, &fast),
            self.plan_route(start, end, &short),
        );

        #[cfg(feature = "parallel")]
        let (safest, (fastest, balanced)) = rayon::join(
            || self.plan_route(start, end, &safe),
            || {
                rayon::join(
                    || self.plan_route(start, end, &fast),
                    || self.plan_route(start, end, &short),
                )
            },
        );

        Ok(RouteVariants { safest: safest?, fastest: fastest?, balanced: balanced? })
    }
}

/// Plan one route on `network` with the default [`AStarRouter`].
pub fn plan_route(
    network: &RoadNetwork,
    start: GeoPoint,
    end: GeoPoint,
    options: &RouteOptions,
) -> RouteResult<Route> {
    RoutePlanner::new(network).plan_route(start, end, options)
}
