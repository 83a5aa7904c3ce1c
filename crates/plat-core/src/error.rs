//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::PlatformId;

/// The top-level error type for `plat-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("platform {0} not found in simulation state")]
    UnknownPlatform(PlatformId),

    #[error("{what} length {got} does not match expected length {expected}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `plat-core`.
pub type CoreResult<T> = Result<T, CoreError>;
