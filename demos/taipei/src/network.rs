//! Built-in Taipei network preset.
//!
//! Three dense lattices spanning Zhongzheng, Da'an, and Xinyi, threaded by
//! the main east–west boulevards and a few north–south connectors.  The
//! lattices are dense enough (50 m) to knit every road into one component.

use hazmap_core::{DensityClass, GeoPoint, RoadType};
use hazmap_network::{GeneratorConfig, HazardZone, IndexKind, MajorRoad, NetworkSpec, Region};

pub const TAIPEI_MAIN_STATION: GeoPoint = GeoPoint { lat: 25.0478, lon: 121.5170 };
pub const TAIPEI_101: GeoPoint = GeoPoint { lat: 25.0340, lon: 121.5645 };

fn region(name: &str, west: f64, east: f64) -> Region {
    Region {
        name: name.to_string(),
        north: 25.0500,
        south: 25.0300,
        east,
        west,
        density: DensityClass::High,
    }
}

fn road(name: &str, road_type: RoadType, speed_limit_kmh: f64, waypoints: &[(f64, f64)]) -> MajorRoad {
    MajorRoad {
        name: name.to_string(),
        road_type,
        speed_limit_kmh: Some(speed_limit_kmh),
        width_m: None,
        waypoints: waypoints.iter().map(|&(lat, lon)| GeoPoint::new(lat, lon)).collect(),
    }
}

pub fn taipei_spec() -> NetworkSpec {
    NetworkSpec {
        regions: vec![
            region("Zhongzheng", 121.5100, 121.5300),
            region("Da'an", 121.5300, 121.5500),
            region("Xinyi", 121.5500, 121.5700),
        ],
        roads: vec![
            road("Zhongxiao E. Rd", RoadType::Arterial, 60.0, &[(25.0420, 121.5170), (25.0415, 121.5440), (25.0412, 121.5680)]),
            road("Ren'ai Rd", RoadType::Arterial, 50.0, &[(25.0380, 121.5190), (25.0375, 121.5440), (25.0385, 121.5570)]),
            road("Xinyi Rd", RoadType::Arterial, 50.0, &[(25.0335, 121.5180), (25.0335, 121.5440), (25.0330, 121.5660)]),
            road("Zhongshan S. Rd", RoadType::Arterial, 50.0, &[(25.0490, 121.5180), (25.0320, 121.5185)]),
            road("Jianguo S. Rd", RoadType::Arterial, 60.0, &[(25.0490, 121.5370), (25.0310, 121.5375)]),
            road("Fuxing S. Rd", RoadType::Collector, 50.0, &[(25.0480, 121.5440), (25.0320, 121.5435)]),
            road("Keelung Rd", RoadType::Arterial, 60.0, &[(25.0480, 121.5560), (25.0390, 121.5545), (25.0310, 121.5580)]),
            road("Songren Rd", RoadType::Collector, 40.0, &[(25.0420, 121.5680), (25.0320, 121.5685)]),
        ],
        config: GeneratorConfig { index: IndexKind::RTree, ..GeneratorConfig::default() },
    }
}

/// Sample incident reports used when no hazard file is given.
pub fn default_hazards() -> Vec<HazardZone> {
    vec![
        HazardZone::new(GeoPoint::new(25.0415, 121.5440), 250.0, 4.5).with_label("Zhongxiao-Fuxing underpass flooding"),
        HazardZone::new(GeoPoint::new(25.0376, 121.5300), 120.0, 5.0).with_label("Ren'ai Rd facade collapse"),
        HazardZone::new(GeoPoint::new(25.0333, 121.5600), 150.0, 3.0).with_label("Xinyi Rd debris"),
    ]
}
