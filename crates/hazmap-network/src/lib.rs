//! `hazmap-network`: synthetic road network, spatial indexing, and hazards.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`network`]   | `RoadNetwork` (CSR), `RoadNetworkBuilder`, `RoadNode`, `RoadSegment` |
//! | [`generator`] | `NetworkGenerator`, `Region`, `MajorRoad`, `GeneratorConfig` |
//! | [`spatial`]   | `SpatialIndex` trait, `LinearScanIndex`, `RTreeIndex`     |
//! | [`hazard`]    | `HazardZone` overlays on node hazard levels               |
//! | [`error`]     | `NetworkError`, `NetworkResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |
//! | `fx-hash` | FxHash for the coordinate-key lookup table.                |

pub mod error;
pub mod generator;
pub mod hazard;
pub mod network;
pub mod spatial;


pub use error::{NetworkError, NetworkResult};
pub use generator::{GeneratorConfig, MajorRoad, NetworkGenerator, NetworkSpec, Region};
pub use hazard::HazardZone;
pub use network::{NetworkStats, NodeAttrs, RoadNetwork, RoadNetworkBuilder, RoadNode, RoadSegment};
pub use spatial::{IndexKind, LinearScanIndex, RTreeIndex, SpatialIndex};
