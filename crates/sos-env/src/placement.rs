//! Patient placement by bounded rejection sampling.
//!
//! A candidate is drawn as `(round(N(W/2, σ)), round(N(W/2, σ)))`, x first,
//! from the shared stream.  Both axes use the x-axis distribution, the same
//! one the expected-density prior is built from.  Candidates outside the grid or on a facility cell
//! are rejected and redrawn.  After `max_attempts` rejected draws the
//! configuration is declared infeasible; the loop never spins forever.

use sos_core::{Location, SimRng, SosError, SosResult};

use crate::density::{axis_distribution, round_half_up};

/// Draw one valid patient location.
///
/// # Errors
///
/// [`SosError::PlacementInfeasible`] if every in-bounds cell is a facility
/// (reported immediately, `attempts = 0`) or if `max_attempts` draws were all
/// rejected.
pub fn sample_patient_location(
    width:        usize,
    height:       usize,
    facilities:   &[Location],
    max_attempts: u32,
    rng:          &mut SimRng,
) -> SosResult<Location> {
    let free_cells = (width * height).saturating_sub(distinct_in_bounds(width, height, facilities));
    if free_cells == 0 {
        return Err(SosError::PlacementInfeasible { attempts: 0 });
    }

    let axis = axis_distribution(width)?;

    for _ in 0..max_attempts {
        let x = round_half_up(rng.sample(&axis));
        let y = round_half_up(rng.sample(&axis));
        if x < 0.0 || y < 0.0 || x >= width as f64 || y >= height as f64 {
            continue;
        }
        let candidate = Location::new(x as i32, y as i32);
        if facilities.contains(&candidate) {
            continue;
        }
        return Ok(candidate);
    }

    Err(SosError::PlacementInfeasible { attempts: max_attempts })
}

fn distinct_in_bounds(width: usize, height: usize, facilities: &[Location]) -> usize {
    let mut seen: Vec<Location> = facilities
        .iter()
        .copied()
        .filter(|l| l.x >= 0 && l.y >= 0 && (l.x as usize) < width && (l.y as usize) < height)
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
