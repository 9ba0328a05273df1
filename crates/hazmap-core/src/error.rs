//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors produced by `hazmap-core` validation and parsing.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("hazard level {0} outside [0, 5]")]
    InvalidHazardLevel(f32),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `hazmap-core`.
pub type CoreResult<T> = Result<T, CoreError>;
