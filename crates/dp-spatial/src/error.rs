//! Spatial-subsystem error types.

use thiserror::Error;

use dp_core::{CoreError, GeoCoord};

/// Why a street map could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `line` is 1-based.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Errors produced by `dp-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("coordinate {0} is not on the street map")]
    BadCoordinate(GeoCoord),

    #[error("no route from {from} to {to}")]
    NoRoute { from: GeoCoord, to: GeoCoord },

    #[error("failed to load street map: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
