//! Procedural road-network generation.
//!
//! A network is generated in three passes, always in the same order:
//!
//! 1. **Lattice**: each [`Region`] is sampled on a uniform grid at its
//!    density's resolution.  Lattice nodes carry no road metadata and are
//!    not linked to each other here.
//! 2. **Major roads**: each [`MajorRoad`] is interpolated at
//!    `road_interval_m` along consecutive waypoint pairs.  Interior points
//!    are pushed sideways by a sinusoid (lane curvature) and, every
//!    `intersection_every` points, by a seeded random jitter (intersection
//!    corners).  Points are merged into the graph by [`CoordKey`], with the
//!    road's metadata overwriting whatever was there, and consecutive points
//!    are linked in both directions.
//! 3. **Repair**: every node still without a segment is linked to each node
//!    within `connect_radius_m` whose road class is compatible.  The isolated
//!    set is taken once before the pass starts.
//!
//! Nodes that find no compatible neighbour stay disconnected; route search
//! reports them as unreachable.
//!
//! [`CoordKey`]: hazmap_core::CoordKey

use hazmap_core::geo::METERS_PER_DEG_LAT;
use hazmap_core::{DensityClass, GenRng, GeoPoint, NodeId, RoadType};

use crate::network::{NodeAttrs, RoadNetwork, RoadNetworkBuilder};
use crate::spatial::IndexKind;
use crate::{NetworkError, NetworkResult};

/// Refuse lattices larger than this many nodes per region.
const MAX_REGION_NODES: usize = 2_000_000;

/// Refuse roads that would interpolate to more than this many points.
const MAX_ROAD_POINTS: usize = 2_000_000;

/// Lattice steps are kept a hair inside the nominal resolution so that
/// neighbours one step apart stay within a connect radius of the same size
/// despite floating-point rounding.
const STEP_SHRINK: f64 = 1.0 - 1e-9;

// ── Inputs ────────────────────────────────────────────────────────────────────

/// A rectangular area to cover with a lattice.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub name:    String,
    pub north:   f64,
    pub south:   f64,
    pub east:    f64,
    pub west:    f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub density: DensityClass,
}

impl Region {
    pub fn validate(&self) -> NetworkResult<()> {
        let invalid = |reason: &str| NetworkError::InvalidRegion {
            name:   self.name.clone(),
            reason: reason.to_owned(),
        };
        GeoPoint::try_new(self.north, self.east)?;
        GeoPoint::try_new(self.south, self.west)?;
        if self.north <= self.south {
            return Err(invalid("north must be greater than south"));
        }
        if self.east <= self.west {
            return Err(invalid("east must be greater than west"));
        }
        Ok(())
    }
}

/// A named road given as an ordered waypoint list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MajorRoad {
    pub name:            String,
    pub road_type:       RoadType,
    /// Defaults to the road type's speed when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_limit_kmh: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub width_m:         Option<f64>,
    pub waypoints:       Vec<GeoPoint>,
}

impl MajorRoad {
    pub fn speed_kmh(&self) -> f64 {
        self.speed_limit_kmh
            .unwrap_or_else(|| self.road_type.default_speed_kmh())
    }

    fn attrs(&self) -> NodeAttrs {
        NodeAttrs {
            road_name:       Some(self.name.clone()),
            road_type:       Some(self.road_type),
            speed_limit_kmh: Some(self.speed_kmh()),
            width_m:         Some(self.width_m.unwrap_or_else(|| self.road_type.default_width_m())),
        }
    }
}

/// Tuning knobs for generation.  Defaults reproduce the reference network
/// shape: 10 m road sampling, 50 m repair radius, a couple of metres of
/// curvature and corner jitter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Target spacing of interpolated road nodes.
    pub road_interval_m:       f64,
    /// Repair-pass link radius for isolated nodes.
    pub connect_radius_m:      f64,
    /// Peak sideways displacement of the curvature sinusoid.
    pub curvature_amplitude_m: f64,
    /// Wavelength of the curvature sinusoid.
    pub curvature_wavelength_m: f64,
    /// Apply corner jitter to every Nth interpolated point; `0` disables it.
    pub intersection_every:    usize,
    /// Maximum corner jitter per axis.
    pub intersection_jitter_m: f64,
    pub seed:                  u64,
    pub index:                 IndexKind,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            road_interval_m:        10.0,
            connect_radius_m:       50.0,
            curvature_amplitude_m:  1.5,
            curvature_wavelength_m: 400.0,
            intersection_every:     5,
            intersection_jitter_m:  2.0,
            seed:                   42,
            index:                  IndexKind::LinearScan,
        }
    }
}

impl GeneratorConfig {
    /// No curvature and no jitter: roads are laid exactly on their waypoints'
    /// great-circle chords.
    pub fn straight() -> Self {
        Self {
            curvature_amplitude_m: 0.0,
            intersection_jitter_m: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> NetworkResult<()> {
        let positive = |v: f64, what: &str| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(NetworkError::Config(format!("{what} must be positive, got {v}")))
            }
        };
        positive(self.road_interval_m, "road_interval_m")?;
        positive(self.connect_radius_m, "connect_radius_m")?;
        positive(self.curvature_wavelength_m, "curvature_wavelength_m")?;
        if self.curvature_amplitude_m < 0.0 || self.intersection_jitter_m < 0.0 {
            return Err(NetworkError::Config("perturbation amplitudes must not be negative".into()));
        }
        Ok(())
    }
}

/// Everything needed to generate one network.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub regions: Vec<Region>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub roads:   Vec<MajorRoad>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub config:  GeneratorConfig,
}

impl NetworkSpec {
    /// Generate the network this spec describes.
    pub fn generate(&self) -> NetworkResult<RoadNetwork> {
        NetworkGenerator::new(self.config.clone())?.generate(&self.regions, &self.roads)
    }
}

// ── NetworkGenerator ──────────────────────────────────────────────────────────

/// Drives the lattice → roads → repair passes over a [`RoadNetworkBuilder`].
pub struct NetworkGenerator {
    config:  GeneratorConfig,
    builder: RoadNetworkBuilder,
}

impl NetworkGenerator {
    pub fn new(config: GeneratorConfig) -> NetworkResult<Self> {
        config.validate()?;
        Ok(Self { config, builder: RoadNetworkBuilder::new() })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run all three passes and build the network.
    pub fn generate(mut self, regions: &[Region], roads: &[MajorRoad]) -> NetworkResult<RoadNetwork> {
        for region in regions {
            self.lay_lattice(region)?;
        }
        for (i, road) in roads.iter().enumerate() {
            self.lay_road(road, i as u64)?;
        }
        let linked = self.connect_isolated();

        let kind = self.config.index;
        let network = self.builder.build_with_index(kind);
        let stats = network.stats();
        log::info!(
            "generated road network: {} nodes, {} segments, {} isolated, {} components ({} repair links, {} index)",
            stats.nodes,
            stats.segments,
            stats.isolated,
            stats.components,
            linked,
            network.index_name(),
        );
        Ok(network)
    }

    /// Pass 1: uniform lattice over `region`.  Returns the number of lattice
    /// points laid (points merging onto existing nodes included).
    pub fn lay_lattice(&mut self, region: &Region) -> NetworkResult<usize> {
        region.validate()?;
        let res = region.density.resolution_m() * STEP_SHRINK;

        // Longitude step is sized at the latitude closest to the equator, so
        // east-west spacing never exceeds the resolution anywhere in the box.
        let widest_cos = region
            .south
            .abs()
            .min(region.north.abs())
            .to_radians()
            .cos();
        let widest_cos = if region.south < 0.0 && region.north > 0.0 { 1.0 } else { widest_cos };

        let lat_step = res / METERS_PER_DEG_LAT;
        let lon_step = res / (METERS_PER_DEG_LAT * widest_cos);

        let rows = ((region.north - region.south) / lat_step).floor() as usize + 1;
        let cols = ((region.east - region.west) / lon_step).floor() as usize + 1;
        if rows.saturating_mul(cols) > MAX_REGION_NODES {
            return Err(NetworkError::InvalidRegion {
                name:   region.name.clone(),
                reason: format!("{rows}×{cols} lattice exceeds {MAX_REGION_NODES} nodes"),
            });
        }

        for r in 0..rows {
            let lat = region.south + r as f64 * lat_step;
            for c in 0..cols {
                let lon = region.west + c as f64 * lon_step;
                self.builder.add_node(GeoPoint::new(lat, lon));
            }
        }
        log::debug!("region {:?}: {rows}×{cols} lattice at {:.0} m", region.name, res);
        Ok(rows * cols)
    }

    /// Pass 2: interpolate one major road.  `stream` selects the road's
    /// jitter RNG stream.  Returns the node ids along the road, in order.
    pub fn lay_road(&mut self, road: &MajorRoad, stream: u64) -> NetworkResult<Vec<NodeId>> {
        for wp in &road.waypoints {
            GeoPoint::try_new(wp.lat, wp.lon)?;
        }
        if road.waypoints.len() < 2 {
            log::warn!("road {:?} has fewer than two waypoints; skipped", road.name);
            return Ok(Vec::new());
        }
        let speed = road.speed_kmh();
        if !(speed.is_finite() && speed > 0.0) {
            return Err(NetworkError::InvalidRoad {
                name:   road.name.clone(),
                reason: format!("speed limit must be positive, got {speed}"),
            });
        }

        let planned: f64 = road
            .waypoints
            .windows(2)
            .map(|pair| (pair[0].distance_m(pair[1]) / self.config.road_interval_m).round().max(1.0))
            .sum();
        if planned > MAX_ROAD_POINTS as f64 {
            return Err(NetworkError::InvalidRoad {
                name:   road.name.clone(),
                reason: format!(
                    "{planned:.0} points at {} m spacing exceeds {MAX_ROAD_POINTS}",
                    self.config.road_interval_m
                ),
            });
        }

        let points = self.interpolate(road, stream);
        let attrs = road.attrs();
        let mut ids: Vec<NodeId> = Vec::with_capacity(points.len());
        for p in points {
            let id = self.builder.upsert_node(p, attrs.clone());
            if ids.last() != Some(&id) {
                ids.push(id);
            }
        }
        for pair in ids.windows(2) {
            self.builder.add_road(pair[0], pair[1], road.road_type, speed);
        }
        log::debug!("road {:?}: {} nodes", road.name, ids.len());
        Ok(ids)
    }

    /// Interpolated, perturbed points along `road` (waypoints included).
    fn interpolate(&self, road: &MajorRoad, stream: u64) -> Vec<GeoPoint> {
        let cfg = &self.config;
        let mut rng = GenRng::for_stream(cfg.seed, stream);
        let mut points = vec![road.waypoints[0]];
        // Running index of interpolated points along the whole road.
        let mut seq = 0usize;

        for pair in road.waypoints.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let len = a.distance_m(b);
            if len < f64::EPSILON {
                continue;
            }
            let steps = ((len / cfg.road_interval_m).round() as usize).max(1);
            // Whole half-waves keep both segment ends on their waypoints.
            let half_waves = ((2.0 * len / cfg.curvature_wavelength_m).round()).max(1.0);

            // Unit normal (to the right of travel) in north/east metres.
            let heading = a.bearing_deg(b).to_radians();
            let (normal_n, normal_e) = (-heading.sin(), heading.cos());

            for k in 1..=steps {
                let t = k as f64 / steps as f64;
                let mut p = a.lerp(b, t);
                if k < steps {
                    seq += 1;
                    let bend = cfg.curvature_amplitude_m * (std::f64::consts::PI * half_waves * t).sin();
                    let (mut north, mut east) = (bend * normal_n, bend * normal_e);
                    if cfg.intersection_every > 0 && seq % cfg.intersection_every == 0 {
                        north += rng.jitter(cfg.intersection_jitter_m);
                        east += rng.jitter(cfg.intersection_jitter_m);
                    }
                    p = p.offset_m(north, east);
                }
                points.push(p);
            }
        }
        points
    }

    /// Pass 3: link each isolated node to every compatible node in range.
    /// Returns the number of two-way links added.
    pub fn connect_isolated(&mut self) -> usize {
        let radius = self.config.connect_radius_m;
        let isolated = self.builder.isolated_nodes();
        let mut linked = 0;

        for id in isolated {
            let here = self.builder.node(id);
            let (here_type, here_speed) = (here.road_type(), here.speed_limit_kmh());
            for other in self.builder.nodes_within_radius(id, radius) {
                let there = self.builder.node(other);
                let there_type = there.road_type();
                if !here_type.is_compatible_with(there_type) {
                    continue;
                }
                // The connector takes the lesser class and the lower speed.
                let road_type = here_type.max(there_type);
                let speed = here_speed.min(there.speed_limit_kmh());
                let before = self.builder.degree(id);
                self.builder.add_road(id, other, road_type, speed);
                if self.builder.degree(id) > before {
                    linked += 1;
                }
            }
        }
        linked
    }
}
