//! Routing error type.

use thiserror::Error;

use hazmap_core::{CoreError, GeoPoint, NodeId};
use hazmap_network::NetworkError;

/// Errors produced by `hazmap-routing`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The search exhausted every reachable node without meeting the goal.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    /// A query point lies farther from the network than the snap limit.
    #[error("point {point} is {distance_m:.0} m from the nearest road (limit {max_m:.0} m)")]
    Unmappable { point: GeoPoint, distance_m: f64, max_m: f64 },

    #[error("road network has no nodes")]
    EmptyNetwork,

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type RouteResult<T> = Result<T, RouteError>;
