//! Circular hazard overlays.
//!
//! A hazard report (flood, landslide, collapsed structure, …) becomes a
//! [`HazardZone`]: every node within the zone's radius has its hazard level
//! raised to at least the zone's level.  Overlapping zones therefore combine
//! by maximum, and applying the same zone twice is a no-op.

use hazmap_core::GeoPoint;

use crate::network::{check_hazard_level, RoadNetwork};
use crate::NetworkResult;

/// A circular area of elevated risk.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardZone {
    pub center:   GeoPoint,
    pub radius_m: f64,
    /// Severity in `[0, 5]`.
    pub level:    f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub label:    Option<String>,
}

impl HazardZone {
    pub fn new(center: GeoPoint, radius_m: f64, level: f32) -> Self {
        Self { center, radius_m, level, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl RoadNetwork {
    /// Raise nodes inside `zone` to at least its level.  Returns how many
    /// nodes fall inside the zone.
    pub fn apply_hazard_zone(&mut self, zone: &HazardZone) -> NetworkResult<usize> {
        check_hazard_level(zone.level)?;
        GeoPoint::try_new(zone.center.lat, zone.center.lon)?;

        let hits = self.nodes_near(zone.center, zone.radius_m.max(0.0));
        for &id in &hits {
            let node = &mut self.nodes[id.index()];
            node.hazard_level = node.hazard_level.max(zone.level);
        }
        log::info!(
            "hazard zone {} (level {:.1}, {:.0} m) covers {} nodes",
            zone.label.as_deref().unwrap_or("<unnamed>"),
            zone.level,
            zone.radius_m,
            hits.len(),
        );
        Ok(hits.len())
    }

    /// Apply several zones in order; stops at the first invalid zone.
    /// Returns the total node hits (a node in two zones counts twice).
    pub fn apply_hazard_zones(&mut self, zones: &[HazardZone]) -> NetworkResult<usize> {
        let mut total = 0;
        for zone in zones {
            total += self.apply_hazard_zone(zone)?;
        }
        Ok(total)
    }
}
