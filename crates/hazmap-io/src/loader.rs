//! Network spec (JSON) and hazard-zone (CSV) loaders.
//!
//! # Network spec
//!
//! A serialised [`NetworkSpec`]: regions, major roads, and an optional
//! generator config.  Missing `config` fields take their defaults.
//!
//! ```json
//! {
//!   "regions": [
//!     { "name": "Zhongzheng", "north": 25.046, "south": 25.030,
//!       "east": 121.525, "west": 121.505, "density": "high" }
//!   ],
//!   "roads": [
//!     { "name": "Roosevelt Rd", "road_type": "arterial",
//!       "waypoints": [ { "lat": 25.040, "lon": 121.512 },
//!                      { "lat": 25.020, "lon": 121.529 } ] }
//!   ],
//!   "config": { "seed": 7 }
//! }
//! ```
//!
//! # Hazard zones
//!
//! One row per zone; `label` may be empty.
//!
//! ```csv
//! lat,lon,radius_m,level,label
//! 25.0330,121.5654,300,4.5,Xinyi flooding
//! 25.0418,121.5120,150,2,
//! ```

use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;

use hazmap_core::GeoPoint;
use hazmap_network::network::MAX_HAZARD_LEVEL;
use hazmap_network::{HazardZone, NetworkSpec};

use crate::{IoError, IoResult};

// ── Network spec ──────────────────────────────────────────────────────────────

/// Load a [`NetworkSpec`] from a JSON file.
pub fn load_network_spec(path: &Path) -> IoResult<NetworkSpec> {
    let file = std::fs::File::open(path)?;
    load_network_spec_reader(std::io::BufReader::new(file))
}

/// Like [`load_network_spec`] but accepts any `Read` source.
pub fn load_network_spec_reader<R: Read>(reader: R) -> IoResult<NetworkSpec> {
    let spec: NetworkSpec = serde_json::from_reader(reader)?;
    for region in &spec.regions {
        region.validate()?;
    }
    spec.config.validate()?;
    log::debug!(
        "loaded network spec: {} regions, {} roads",
        spec.regions.len(),
        spec.roads.len()
    );
    Ok(spec)
}

/// Write `spec` as pretty-printed JSON.
pub fn save_network_spec(path: &Path, spec: &NetworkSpec) -> IoResult<()> {
    let file = std::fs::File::create(path)?;
    write_network_spec(file, spec)
}

pub fn write_network_spec<W: Write>(mut writer: W, spec: &NetworkSpec) -> IoResult<()> {
    serde_json::to_writer_pretty(&mut writer, spec)?;
    writer.write_all(b"\n")?;
    Ok(())
}

// ── Hazard zones ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HazardRecord {
    lat:      f64,
    lon:      f64,
    radius_m: f64,
    level:    f32,
    #[serde(default)]
    label:    Option<String>,
}

/// Load hazard zones from a CSV file.
pub fn load_hazard_zones_csv(path: &Path) -> IoResult<Vec<HazardZone>> {
    let file = std::fs::File::open(path)?;
    load_hazard_zones_reader(file)
}

/// Like [`load_hazard_zones_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_hazard_zones_reader<R: Read>(reader: R) -> IoResult<Vec<HazardZone>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut zones = Vec::new();
    for (i, result) in csv_reader.deserialize::<HazardRecord>().enumerate() {
        let row = result?;
        // Header is line 1.
        let line = i + 2;

        let center = GeoPoint::try_new(row.lat, row.lon)
            .map_err(|e| IoError::Parse(format!("line {line}: {e}")))?;
        if !(row.radius_m.is_finite() && row.radius_m >= 0.0) {
            return Err(IoError::Parse(format!(
                "line {line}: radius_m must be a non-negative number, got {}",
                row.radius_m
            )));
        }
        if !(0.0..=MAX_HAZARD_LEVEL).contains(&row.level) {
            return Err(IoError::Parse(format!(
                "line {line}: level must be in [0, {MAX_HAZARD_LEVEL}], got {}",
                row.level
            )));
        }

        let zone = HazardZone::new(center, row.radius_m, row.level);
        zones.push(match row.label.filter(|l| !l.is_empty()) {
            Some(label) => zone.with_label(label),
            None => zone,
        });
    }
    log::debug!("loaded {} hazard zones", zones.len());
    Ok(zones)
}
