//! Network-subsystem error type.

use thiserror::Error;

use hazmap_core::{CoreError, EdgeId, NodeId};

/// Errors produced by `hazmap-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("segment {0} not found in network")]
    EdgeNotFound(EdgeId),

    #[error("invalid region {name:?}: {reason}")]
    InvalidRegion { name: String, reason: String },

    #[error("invalid road {name:?}: {reason}")]
    InvalidRoad { name: String, reason: String },

    #[error("generator configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
