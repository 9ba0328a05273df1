//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing
//! segments.  Given a `NodeId n`, its outgoing segments occupy:
//!
//! ```text
//! segments[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Segments are sorted by `(from, to)`, so a node's neighbours are visited in
//! ascending id order; search tie-breaks depend on that.
//!
//! # Mutability
//!
//! Topology and coordinates are frozen by [`RoadNetworkBuilder::build`].
//! Two attributes stay mutable for the network's lifetime: per-segment
//! [`TrafficCondition`] and per-node hazard level.  Route searches take
//! `&RoadNetwork`, so updates and searches never overlap.

use std::collections::BTreeSet;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as KeyMap;
#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as KeyMap;

use hazmap_core::{CoordKey, CoreError, EdgeId, GeoPoint, NodeId, RoadType, TrafficCondition};

use crate::spatial::{self, IndexKind, LinearScanIndex, RTreeIndex, SpatialIndex};
use crate::{NetworkError, NetworkResult};

/// Upper bound of the hazard scale.
pub const MAX_HAZARD_LEVEL: f32 = 5.0;

// ── Node / segment records ────────────────────────────────────────────────────

/// Road metadata carried by a node.  `None` fields are "unknown"; merging
/// only overwrites with `Some`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAttrs {
    pub road_name:       Option<String>,
    pub road_type:       Option<RoadType>,
    pub speed_limit_kmh: Option<f64>,
    pub width_m:         Option<f64>,
}

impl NodeAttrs {
    /// Last write wins, field by field.
    fn merge_from(&mut self, other: NodeAttrs) {
        if other.road_name.is_some() {
            self.road_name = other.road_name;
        }
        if other.road_type.is_some() {
            self.road_type = other.road_type;
        }
        if other.speed_limit_kmh.is_some() {
            self.speed_limit_kmh = other.speed_limit_kmh;
        }
        if other.width_m.is_some() {
            self.width_m = other.width_m;
        }
    }
}

/// A point in the road graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadNode {
    /// Coordinate-derived identity.
    pub key:          CoordKey,
    pub pos:          GeoPoint,
    pub attrs:        NodeAttrs,
    /// Simulated disaster risk in `[0, 5]`.
    pub hazard_level: f32,
}

impl RoadNode {
    /// Road class used for connection rules; untyped lattice nodes count as
    /// local streets.
    #[inline]
    pub fn road_type(&self) -> RoadType {
        self.attrs.road_type.unwrap_or_default()
    }

    #[inline]
    pub fn speed_limit_kmh(&self) -> f64 {
        self.attrs
            .speed_limit_kmh
            .unwrap_or_else(|| self.road_type().default_speed_kmh())
    }

    #[inline]
    pub fn road_name(&self) -> Option<&str> {
        self.attrs.road_name.as_deref()
    }
}

/// A directed segment between two adjacent nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegment {
    pub from:          NodeId,
    pub to:            NodeId,
    /// Haversine length between the endpoints at creation time.
    pub distance_m:    f64,
    /// Nominal travel time at the segment's speed limit.
    pub travel_time_s: f64,
    pub road_type:     RoadType,
    pub traffic:       TrafficCondition,
}

/// Summary counts reported after generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NetworkStats {
    pub nodes:      usize,
    /// Directed segment count (a two-way road contributes two).
    pub segments:   usize,
    pub isolated:   usize,
    pub components: usize,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Do not construct directly; use [`RoadNetworkBuilder`] or
/// [`NetworkGenerator`](crate::NetworkGenerator).
pub struct RoadNetwork {
    /// Node records, indexed by `NodeId`.
    pub nodes: Vec<RoadNode>,

    /// CSR row pointer.  Outgoing segments of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Segment records, indexed by `EdgeId`, sorted by `(from, to)`.
    pub segments: Vec<RoadSegment>,

    key_index: KeyMap<CoordKey, NodeId>,
    index:     Box<dyn SpatialIndex>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or segments.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &RoadNode {
        &self.nodes[id.index()]
    }

    pub fn get_node(&self, id: NodeId) -> NetworkResult<&RoadNode> {
        self.nodes.get(id.index()).ok_or(NetworkError::NodeNotFound(id))
    }

    #[inline]
    pub fn segment(&self, edge: EdgeId) -> &RoadSegment {
        &self.segments[edge.index()]
    }

    /// Node whose coordinate quantizes to `key`, if any.
    pub fn node_by_key(&self, key: CoordKey) -> Option<NodeId> {
        self.key_index.get(&key).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing segments from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Neighbour ids of `node`, ascending.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.segments[e.index()].to)
    }

    /// The segment `from → to`, if the two nodes are adjacent.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        if from.index() >= self.node_count() {
            return None;
        }
        let start = self.node_out_start[from.index()] as usize;
        let end   = self.node_out_start[from.index() + 1] as usize;
        self.segments[start..end]
            .binary_search_by_key(&to, |s| s.to)
            .ok()
            .map(|i| EdgeId((start + i) as u32))
    }

    /// Fastest nominal speed over any segment, in m/s (`0.0` with no
    /// segments).  Bounds travel-time heuristics from below.
    pub fn max_segment_speed_mps(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.travel_time_s > 0.0)
            .map(|s| s.distance_m / s.travel_time_s)
            .fold(0.0, f64::max)
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The nearest node to `pos` and its distance in metres.
    ///
    /// There is no distance ceiling here; callers that must reject far-away
    /// points (route snapping) check the returned distance.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<(NodeId, f64)> {
        self.index.nearest(pos)
    }

    /// All other nodes within `radius_m` of `node`, ascending by id.
    pub fn nodes_within_radius(&self, node: NodeId, radius_m: f64) -> NetworkResult<Vec<NodeId>> {
        let pos = self.get_node(node)?.pos;
        let mut ids = self.index.within_radius(pos, radius_m);
        ids.retain(|&id| id != node);
        Ok(ids)
    }

    /// All nodes within `radius_m` of an arbitrary point.
    pub fn nodes_near(&self, pos: GeoPoint, radius_m: f64) -> Vec<NodeId> {
        self.index.within_radius(pos, radius_m)
    }

    pub fn index_name(&self) -> &'static str {
        self.index.name()
    }

    // ── Mutable attributes ────────────────────────────────────────────────

    pub fn set_traffic(&mut self, edge: EdgeId, traffic: TrafficCondition) -> NetworkResult<()> {
        let seg = self
            .segments
            .get_mut(edge.index())
            .ok_or(NetworkError::EdgeNotFound(edge))?;
        seg.traffic = traffic;
        Ok(())
    }

    /// Set the traffic state of every segment whose two endpoints both
    /// belong to the named road.  Returns the number of segments updated.
    pub fn set_road_traffic(&mut self, road_name: &str, traffic: TrafficCondition) -> usize {
        let mut updated = 0;
        for seg in &mut self.segments {
            let on_road = |n: NodeId| self.nodes[n.index()].road_name() == Some(road_name);
            if on_road(seg.from) && on_road(seg.to) {
                seg.traffic = traffic;
                updated += 1;
            }
        }
        log::debug!("traffic on {road_name:?} set to {} ({updated} segments)", traffic.as_str());
        updated
    }

    pub fn set_hazard_level(&mut self, node: NodeId, level: f32) -> NetworkResult<()> {
        check_hazard_level(level)?;
        let n = self
            .nodes
            .get_mut(node.index())
            .ok_or(NetworkError::NodeNotFound(node))?;
        n.hazard_level = level;
        Ok(())
    }

    /// Reset every node's hazard level to zero.
    pub fn clear_hazards(&mut self) {
        for n in &mut self.nodes {
            n.hazard_level = 0.0;
        }
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Node, segment, isolated-node, and weakly connected component counts.
    pub fn stats(&self) -> NetworkStats {
        let n = self.node_count();
        let isolated = (0..n).filter(|&i| self.out_degree(NodeId(i as u32)) == 0).count();

        // Undirected view so one-way segments don't split components.
        let mut undirected: Vec<Vec<u32>> = vec![Vec::new(); n];
        for s in &self.segments {
            undirected[s.from.index()].push(s.to.0);
            undirected[s.to.index()].push(s.from.0);
        }

        let mut seen = vec![false; n];
        let mut components = 0;
        let mut stack = Vec::new();
        for root in 0..n {
            if seen[root] {
                continue;
            }
            components += 1;
            seen[root] = true;
            stack.push(root as u32);
            while let Some(v) = stack.pop() {
                for &w in &undirected[v as usize] {
                    if !seen[w as usize] {
                        seen[w as usize] = true;
                        stack.push(w);
                    }
                }
            }
        }

        NetworkStats { nodes: n, segments: self.edge_count(), isolated, components }
    }
}

pub(crate) fn check_hazard_level(level: f32) -> NetworkResult<()> {
    if (0.0..=MAX_HAZARD_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(CoreError::InvalidHazardLevel(level).into())
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes are keyed by [`CoordKey`]: inserting a point that quantizes onto an
/// existing node merges metadata into that node (first position kept,
/// `Some` attributes overwrite) and returns the existing id.  Segment lengths
/// are always the haversine distance between endpoints.
///
/// # Example
///
/// ```
/// use hazmap_core::{GeoPoint, RoadType};
/// use hazmap_network::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(25.0418, 121.5120));
/// let c = b.add_node(GeoPoint::new(25.0418, 121.5130));
/// b.add_road(a, c, RoadType::Local, 40.0);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<RoadNode>,
    key_index: KeyMap<CoordKey, NodeId>,
    /// Outgoing neighbour sets; dedupes parallel segments.
    out:       Vec<BTreeSet<NodeId>>,
    raw_edges: Vec<RoadSegment>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            key_index: KeyMap::default(),
            out:       Vec::new(),
            raw_edges: Vec::new(),
        }
    }

    /// Add an untyped node (or return the existing node at that coordinate).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        self.upsert_node(pos, NodeAttrs::default())
    }

    /// Insert a node, or merge `attrs` into the node already occupying the
    /// same [`CoordKey`].
    pub fn upsert_node(&mut self, pos: GeoPoint, attrs: NodeAttrs) -> NodeId {
        let key = CoordKey::of(pos);
        if let Some(&id) = self.key_index.get(&key) {
            self.nodes[id.index()].attrs.merge_from(attrs);
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RoadNode { key, pos, attrs, hazard_level: 0.0 });
        self.out.push(BTreeSet::new());
        self.key_index.insert(key, id);
        id
    }

    /// Add a **directed** segment `from → to` timed at `speed_kmh`.
    ///
    /// Self-loops and duplicates are ignored; returns whether a segment was
    /// added.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        road_type: RoadType,
        speed_kmh: f64,
    ) -> bool {
        if from == to || !self.out[from.index()].insert(to) {
            return false;
        }
        let distance_m = self.nodes[from.index()].pos.distance_m(self.nodes[to.index()].pos);
        let travel_time_s = distance_m / (speed_kmh.max(1.0) / 3.6);
        self.raw_edges.push(RoadSegment {
            from,
            to,
            distance_m,
            travel_time_s,
            road_type,
            traffic: TrafficCondition::Smooth,
        });
        true
    }

    /// Add segments in **both directions**.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, road_type: RoadType, speed_kmh: f64) {
        self.add_directed_edge(a, b, road_type, speed_kmh);
        self.add_directed_edge(b, a, road_type, speed_kmh);
    }

    pub fn node(&self, id: NodeId) -> &RoadNode {
        &self.nodes[id.index()]
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()].pos
    }

    /// Set the initial hazard level of a node.
    pub fn set_hazard_level(&mut self, id: NodeId, level: f32) -> NetworkResult<()> {
        check_hazard_level(level)?;
        self.nodes[id.index()].hazard_level = level;
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Number of outgoing segments added so far.
    pub fn degree(&self, id: NodeId) -> usize {
        self.out[id.index()].len()
    }

    /// Nodes with no outgoing segments, ascending.
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&i| self.out[i].is_empty())
            .map(|i| NodeId(i as u32))
            .collect()
    }

    /// Other nodes within `radius_m` of `id` (linear scan), ascending.
    pub fn nodes_within_radius(&self, id: NodeId, radius_m: f64) -> Vec<NodeId> {
        let pos = self.node_pos(id);
        let mut ids = spatial::scan_within(self.positions(), pos, radius_m);
        ids.retain(|&n| n != id);
        ids
    }

    fn positions(&self) -> impl Iterator<Item = (NodeId, GeoPoint)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n.pos))
    }

    /// Consume the builder and produce a [`RoadNetwork`] with a linear-scan
    /// spatial index.
    pub fn build(self) -> RoadNetwork {
        self.build_with_index(IndexKind::LinearScan)
    }

    /// Consume the builder, sort segments into CSR order, and build the
    /// requested spatial index.
    pub fn build_with_index(self, kind: IndexKind) -> RoadNetwork {
        let node_count = self.nodes.len();

        let mut segments = self.raw_edges;
        segments.sort_unstable_by_key(|s| (s.from, s.to));

        let mut node_out_start = vec![0u32; node_count + 1];
        for s in &segments {
            node_out_start[s.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, segments.len());

        let positions: Vec<GeoPoint> = self.nodes.iter().map(|n| n.pos).collect();
        let index: Box<dyn SpatialIndex> = match kind {
            IndexKind::LinearScan => Box::new(LinearScanIndex::new(positions)),
            IndexKind::RTree      => Box::new(RTreeIndex::new(&positions)),
        };

        RoadNetwork {
            nodes: self.nodes,
            node_out_start,
            segments,
            key_index: self.key_index,
            index,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
