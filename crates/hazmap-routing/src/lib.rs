//! `hazmap-routing`: hazard-aware route planning over a `RoadNetwork`.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`cost`]         | `Objective`, `HeuristicPolicy`, `CostModel`              |
//! | [`router`]       | `Router` trait, `AStarRouter`, `PathResult`              |
//! | [`instructions`] | `Turn`, `classify_turn`, `Instruction`, text building    |
//! | [`route`]        | `Route` and its assembly from a path                     |
//! | [`planner`]      | `RoutePlanner`, `RouteOptions`, route variants           |
//! | [`error`]        | `RouteError`, `RouteResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.       |
//! | `parallel` | Plans the three route variants concurrently with rayon.  |

pub mod cost;
pub mod error;
pub mod instructions;
pub mod planner;
pub mod route;
pub mod router;

#[cfg(test)]
mod tests;

pub use cost::{CostModel, HeuristicPolicy, Objective};
pub use error::{RouteError, RouteResult};
pub use instructions::{classify_turn, format_distance, Instruction, Maneuver, Turn};
pub use planner::{plan_route, RouteOptions, RoutePlanner, RouteVariants, VariantRequest};
pub use route::Route;
pub use router::{AStarRouter, PathResult, Router};
