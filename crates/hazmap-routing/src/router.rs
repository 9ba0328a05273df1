//! Routing trait and default A* implementation.
//!
//! # Pluggability
//!
//! [`RoutePlanner`](crate::RoutePlanner) calls path search via the [`Router`]
//! trait, so applications can swap in other engines (contraction
//! hierarchies, bidirectional search) without touching route assembly.
//!
//! # Determinism
//!
//! The open set is a min-heap keyed on `(f, NodeId)`: among equal `f`
//! scores the lowest node id is expanded first.  Neighbours are relaxed in
//! ascending id order (CSR layout), so identical inputs give identical
//! paths.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use hazmap_core::{EdgeId, NodeId};
use hazmap_network::RoadNetwork;

use crate::cost::CostModel;
use crate::{RouteError, RouteResult};

// ── PathResult ────────────────────────────────────────────────────────────────

/// Node sequence found by a [`Router`], before route assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Visited nodes from source to destination, inclusive.
    pub nodes: Vec<NodeId>,
    /// Segments traversed; `edges[i]` joins `nodes[i]` and `nodes[i + 1]`.
    pub edges: Vec<EdgeId>,
    /// Accumulated search cost under the model used.
    pub cost: f64,
}

impl PathResult {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path search engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so route variants can be searched
/// concurrently against one shared network.
pub trait Router: Send + Sync {
    /// Cheapest path from `from` to `to` under `model`.
    ///
    /// `from == to` yields a single-node path.  An unreachable goal is
    /// [`RouteError::NoRoute`], never an empty path.
    fn find_path(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        model: &CostModel,
    ) -> RouteResult<PathResult>;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the CSR road graph, with the heuristic selected by
/// [`CostModel::heuristic`].
///
/// There is no closed set: a node popped with a stale score is skipped, and
/// a node whose score improves later is pushed again.  Under an
/// overestimating heuristic this keeps the search complete.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarRouter;

impl Router for AStarRouter {
    fn find_path(
        &self,
        network: &RoadNetwork,
        from: NodeId,
        to: NodeId,
        model: &CostModel,
    ) -> RouteResult<PathResult> {
        astar(network, from, to, model)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Heap key: total order over `f64` so scores can sit in a `BinaryHeap`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Score(f64);

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn astar(
    network: &RoadNetwork,
    from: NodeId,
    to: NodeId,
    model: &CostModel,
) -> RouteResult<PathResult> {
    network.get_node(from)?;
    let goal = network.get_node(to)?.pos;

    if from == to {
        return Ok(PathResult { nodes: vec![from], edges: vec![], cost: 0.0 });
    }

    let n = network.node_count();
    let per_meter = model.min_cost_per_meter(network);
    let h = |node: NodeId| model.estimate(network.node(node).pos, goal, per_meter);

    // g[v] = best known cost from `from` to v.
    let mut g = vec![f64::INFINITY; n];
    // f[v] = g[v] + h(v) at the time v was last pushed.
    let mut f = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    g[from.index()] = 0.0;
    f[from.index()] = h(from);

    // Min-heap: (f, node). Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(Score, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Score(f[from.index()]), from)));
    let mut expanded = 0usize;

    while let Some(Reverse((Score(score), node))) = heap.pop() {
        if node == to {
            log::debug!(
                "A* {from} -> {to}: cost {:.1}, {expanded} expansions",
                g[to.index()]
            );
            return Ok(reconstruct(network, &prev_edge, from, to, g[to.index()]));
        }

        // Skip stale heap entries.
        if score > f[node.index()] {
            continue;
        }
        expanded += 1;

        let base = g[node.index()];
        for edge in network.out_edges(node) {
            let neighbor = network.segment(edge).to;
            let tentative = base + model.edge_cost(network, edge);

            if tentative < g[neighbor.index()] {
                g[neighbor.index()] = tentative;
                f[neighbor.index()] = tentative + h(neighbor);
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((Score(f[neighbor.index()]), neighbor)));
            }
        }
    }

    log::debug!("A* {from} -> {to}: open set exhausted after {expanded} expansions");
    Err(RouteError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: &[EdgeId],
    from: NodeId,
    to: NodeId,
    cost: f64,
) -> PathResult {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        edges.push(e);
        cur = network.segment(e).from;
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|&e| network.segment(e).to));
    PathResult { nodes, edges, cost }
}
