//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SosError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

/// The top-level error type for `sos-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SosError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("location ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x:      i32,
        y:      i32,
        width:  usize,
        height: usize,
    },

    /// Rejection sampling found no valid patient cell within the attempt
    /// budget: the grid/facility combination leaves no usable cell, or the
    /// usable cells are too improbable under the placement distribution.
    #[error("no valid patient location found after {attempts} attempts")]
    PlacementInfeasible { attempts: u32 },

    #[error("distribution error: {0}")]
    Distribution(String),
}

/// Shorthand result type for all `sos-*` crates.
pub type SosResult<T> = Result<T, SosError>;
