//! Expected patient density: the publicly known prior.
//!
//! # Model
//!
//! Each axis is a normal distribution centred on the integer midpoint
//! `extent / 2` with σ = [`PLACEMENT_STD_DEV`].  The probability mass a cell
//! receives on one axis is `cdf(c) − cdf(c − 1)`, and a cell's expected count
//! is
//!
//! ```text
//! round(mass_y × (mass_x × total_patients))
//! ```
//!
//! The grid depends only on geometry and the patient count, never on where
//! patients were actually placed.  Because mass beyond the grid edges is
//! discarded and every cell is rounded, the sum is within a few units of the
//! patient count on grids wide enough to hold the distribution (±4σ), and
//! can fall well short on small ones.
//!
//! # Shared axis distribution
//!
//! The y-axis mass is taken from the *x-axis* distribution (mean `width / 2`).
//! On square grids this is identical to a per-axis model; on non-square grids
//! the density is centred on `(width / 2, width / 2)`.  This matches the
//! observed behaviour of the reference scenario and is pinned by tests.

use statrs::distribution::{ContinuousCDF, Normal};

use sos_core::{Grid, SosError, SosResult};

/// Standard deviation, in cells, of both placement axes.
pub const PLACEMENT_STD_DEV: f64 = 1.5;

/// The normal distribution for one axis of length `extent`.
pub fn axis_distribution(extent: usize) -> SosResult<Normal> {
    let mean = (extent / 2) as f64;
    Normal::new(mean, PLACEMENT_STD_DEV)
        .map_err(|e| SosError::Distribution(format!("axis N({mean}, {PLACEMENT_STD_DEV}): {e}")))
}

/// Probability mass of the unit interval `(c − 1, c]`.
#[inline]
fn axis_mass(dist: &Normal, c: i32) -> f64 {
    dist.cdf(c as f64) - dist.cdf((c - 1) as f64)
}

/// Round half up, so `2.5 → 3` and `-0.5 → 0`.
#[inline]
pub(crate) fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Build the `width × height` expected-density grid for `total_patients`.
pub fn expected_density(width: usize, height: usize, total_patients: usize) -> SosResult<Grid<u32>> {
    let x_axis = axis_distribution(width)?;
    let total = total_patients as f64;

    Grid::from_fn(width, height, |cell| {
        let n_x = axis_mass(&x_axis, cell.x) * total;
        let n_xy = axis_mass(&x_axis, cell.y) * n_x;
        round_half_up(n_xy) as u32
    })
}
