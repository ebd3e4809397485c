//! Planner error types.

use thiserror::Error;

use dp_optimize::OptimizeError;
use dp_spatial::SpatialError;

/// Why a delivery manifest could not be read.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `line` is 1-based.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("manifest has no depot line")]
    MissingDepot,
}

/// Errors produced by `dp-planner`.
#[derive(Debug, Error)]
pub enum PlanError {
    /// A leg could not be routed.  Carries the router's error unchanged.
    #[error(transparent)]
    Route(#[from] SpatialError),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    #[error("failed to read delivery manifest: {0}")]
    Manifest(#[from] ManifestError),
}

pub type PlanResult<T> = Result<T, PlanError>;
