//! `hazmap-core`: foundational types for the `hazmap` route planner.
//!
//! This crate is a dependency of every other `hazmap-*` crate.  It has no
//! `hazmap-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `EdgeId`, `CoordKey`                           |
//! | [`geo`]       | `GeoPoint`, haversine distance, bearings, turn angles    |
//! | [`road`]      | `RoadType`, `TrafficCondition`, `DensityClass`           |
//! | [`travel`]    | `TravelMode` enum and average speeds                     |
//! | [`rng`]       | `GenRng` (seeded generator for synthetic jitter)         |
//! | [`error`]     | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod road;
pub mod travel;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{CoordKey, EdgeId, NodeId};
pub use rng::GenRng;
pub use road::{DensityClass, RoadType, TrafficCondition};
pub use travel::TravelMode;
