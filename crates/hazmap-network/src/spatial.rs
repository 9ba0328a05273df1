//! Nearest-node and radius queries.
//!
//! Both implementations answer the same two questions with the same
//! contract:
//!
//! - `nearest` returns the node minimising haversine distance.  Ties go to
//!   the lowest `NodeId` (the first one a full scan in id order meets).
//! - `within_radius` returns every node whose haversine distance is
//!   `<= radius_m`, sorted by ascending `NodeId`.
//!
//! [`LinearScanIndex`] is a brute-force scan, O(N) per query and fine for
//! synthetic graphs in the low thousands of nodes.  [`RTreeIndex`] uses an
//! `rstar` R-tree over locally projected metre coordinates and re-checks
//! candidates with haversine, so callers see identical results at any scale.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use hazmap_core::geo::METERS_PER_DEG_LAT;
use hazmap_core::{GeoPoint, NodeId};

/// Query interface shared by all spatial backends.
///
/// Implementations must be `Send + Sync` so a built network can be shared by
/// concurrent route searches.
pub trait SpatialIndex: Send + Sync {
    /// Nearest node to `point` and its distance in metres.  `None` only for
    /// an empty index.
    fn nearest(&self, point: GeoPoint) -> Option<(NodeId, f64)>;

    /// All nodes within `radius_m` of `point`, ascending by id.
    fn within_radius(&self, point: GeoPoint, radius_m: f64) -> Vec<NodeId>;

    /// Short backend label for logs.
    fn name(&self) -> &'static str;
}

/// Backend selector for [`RoadNetworkBuilder::build_with_index`].
///
/// [`RoadNetworkBuilder::build_with_index`]: crate::RoadNetworkBuilder::build_with_index
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexKind {
    #[default]
    LinearScan,
    RTree,
}

// ── Scan helpers (also used by the builder before an index exists) ────────────

/// First-found minimum over `(id, position)` pairs in iteration order.
pub(crate) fn scan_nearest(
    points: impl Iterator<Item = (NodeId, GeoPoint)>,
    target: GeoPoint,
) -> Option<(NodeId, f64)> {
    let mut best: Option<(NodeId, f64)> = None;
    for (id, pos) in points {
        let d = pos.distance_m(target);
        // Strict `<` keeps the earliest node on ties.
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((id, d));
        }
    }
    best
}

pub(crate) fn scan_within(
    points: impl Iterator<Item = (NodeId, GeoPoint)>,
    target: GeoPoint,
    radius_m: f64,
) -> Vec<NodeId> {
    points
        .filter(|(_, pos)| pos.distance_m(target) <= radius_m)
        .map(|(id, _)| id)
        .collect()
}

// ── LinearScanIndex ───────────────────────────────────────────────────────────

/// Brute-force index: one pass over every node per query.
pub struct LinearScanIndex {
    positions: Vec<GeoPoint>,
}

impl LinearScanIndex {
    pub fn new(positions: Vec<GeoPoint>) -> Self {
        Self { positions }
    }

    fn iter(&self) -> impl Iterator<Item = (NodeId, GeoPoint)> + '_ {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &p)| (NodeId(i as u32), p))
    }
}

impl SpatialIndex for LinearScanIndex {
    fn nearest(&self, point: GeoPoint) -> Option<(NodeId, f64)> {
        scan_nearest(self.iter(), point)
    }

    fn within_radius(&self, point: GeoPoint, radius_m: f64) -> Vec<NodeId> {
        scan_within(self.iter(), point, radius_m)
    }

    fn name(&self) -> &'static str {
        "linear-scan"
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a projected `[x, y]` point in metres with the
/// associated `NodeId` and original coordinate.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    pos:   GeoPoint,
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Projected distances may differ from haversine by a fraction of a
/// percent across a city; candidates are gathered with this slack and then
/// filtered exactly.
const PROJECTION_SLACK: f64 = 1.01;

/// R-tree backed index.  Construction is O(N log N) (bulk load).
pub struct RTreeIndex {
    tree:    RTree<NodeEntry>,
    cos_ref: f64,
}

impl RTreeIndex {
    pub fn new(positions: &[GeoPoint]) -> Self {
        // Equirectangular projection around the mean latitude.
        let mean_lat = if positions.is_empty() {
            0.0
        } else {
            positions.iter().map(|p| p.lat).sum::<f64>() / positions.len() as f64
        };
        let cos_ref = mean_lat.to_radians().cos();

        let entries: Vec<NodeEntry> = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: project(pos, cos_ref),
                pos,
                id: NodeId(i as u32),
            })
            .collect();

        Self { tree: RTree::bulk_load(entries), cos_ref }
    }
}

#[inline]
fn project(pos: GeoPoint, cos_ref: f64) -> [f64; 2] {
    [
        pos.lon * METERS_PER_DEG_LAT * cos_ref,
        pos.lat * METERS_PER_DEG_LAT,
    ]
}

impl SpatialIndex for RTreeIndex {
    fn nearest(&self, point: GeoPoint) -> Option<(NodeId, f64)> {
        let q = project(point, self.cos_ref);
        let mut iter = self.tree.nearest_neighbor_iter_with_distance_2(&q);
        let (first, first_d2) = iter.next()?;

        // Re-rank every candidate that could still win under haversine.
        let bound = first_d2.sqrt() * PROJECTION_SLACK + 1e-6;
        let mut best = (first.id, first.pos.distance_m(point));
        for (entry, d2) in iter {
            if d2.sqrt() > bound {
                break;
            }
            let d = entry.pos.distance_m(point);
            if d < best.1 || (d == best.1 && entry.id < best.0) {
                best = (entry.id, d);
            }
        }
        Some(best)
    }

    fn within_radius(&self, point: GeoPoint, radius_m: f64) -> Vec<NodeId> {
        let q = project(point, self.cos_ref);
        let reach = radius_m * PROJECTION_SLACK + 1e-6;
        let mut ids: Vec<NodeId> = self
            .tree
            .locate_within_distance(q, reach * reach)
            .filter(|e| e.pos.distance_m(point) <= radius_m)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn name(&self) -> &'static str {
        "r-tree"
    }
}
