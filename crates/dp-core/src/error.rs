//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` via `From`
//! where a core failure can surface through them.

use thiserror::Error;

/// Errors produced while constructing `dp-core` values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({lat:?}, {lon:?}): {reason}")]
    InvalidCoordinate {
        lat:    String,
        lon:    String,
        reason: &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `dp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
