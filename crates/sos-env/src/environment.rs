//! The `Environment`: patient registry, occupancy, and the density prior.

use sos_core::{Grid, Location, PatientId, ScenarioConfig, SimRng, SosError, SosResult};
use tracing::info;

use crate::density::expected_density;
use crate::placement::sample_patient_location;
use crate::Patient;

/// Authoritative casualty state for one scenario.
///
/// # Invariants
///
/// - `occupancy[l]` lists exactly the patients whose `location()` is `l`;
///   every patient appears in exactly one cell.  Rebuilt on every reset.
/// - `expected` is a pure function of `(width, height, patients.len())`.
/// - No patient is ever placed on a registered facility cell.
pub struct Environment {
    width:                  usize,
    height:                 usize,
    initial_vitality:       u32,
    max_placement_attempts: u32,

    patients:   Vec<Patient>,
    occupancy:  Grid<Vec<PatientId>>,
    expected:   Grid<u32>,
    facilities: Vec<Location>,
}

impl Environment {
    /// Allocate the registry and grids for `config`.
    ///
    /// Patients exist but are unplaced (all at the origin, outside the
    /// occupancy grid) until the first [`reset`](Self::reset).
    pub fn new(config: &ScenarioConfig) -> SosResult<Self> {
        config.validate()?;

        let patients = (0..config.patient_count)
            .map(|i| Patient::new(PatientId::from_index(i), config.initial_vitality))
            .collect();

        Ok(Self {
            width:                  config.width,
            height:                 config.height,
            initial_vitality:       config.initial_vitality,
            max_placement_attempts: config.max_placement_attempts,
            patients,
            occupancy:  Grid::new(config.width, config.height)?,
            expected:   expected_density(config.width, config.height, config.patient_count)?,
            facilities: Vec::new(),
        })
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `true` iff `location` is a cell of this grid.
    #[inline]
    pub fn contains(&self, location: Location) -> bool {
        self.occupancy.contains(location)
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Replace the set of fixed facility locations excluded from placement.
    ///
    /// # Errors
    ///
    /// [`SosError::OutOfBounds`] for a facility outside the grid; the
    /// previous registration is kept in that case.
    pub fn register_facilities<I>(&mut self, locations: I) -> SosResult<()>
    where
        I: IntoIterator<Item = Location>,
    {
        let locations: Vec<Location> = locations.into_iter().collect();
        if let Some(bad) = locations.iter().find(|&&l| !self.contains(l)) {
            return Err(SosError::OutOfBounds {
                x:      bad.x,
                y:      bad.y,
                width:  self.width,
                height: self.height,
            });
        }
        self.facilities = locations;
        Ok(())
    }

    /// Re-derive all patient state: statuses and vitality restored, every
    /// patient re-placed, occupancy rebuilt, density prior recomputed.
    ///
    /// Consumes two gaussian draws per placement attempt from `rng`, in
    /// patient-registry order.  If any placement fails, nothing is changed.
    pub fn reset(&mut self, rng: &mut SimRng) -> SosResult<()> {
        let locations = (0..self.patients.len())
            .map(|_| self.random_patient_location(rng))
            .collect::<SosResult<Vec<_>>>()?;
        let expected = expected_density(self.width, self.height, self.patients.len())?;

        self.occupancy.clear();
        for (patient, location) in self.patients.iter_mut().zip(locations) {
            patient.reset(self.initial_vitality);
            patient.set_location(location);
            self.occupancy[location].push(patient.id());
        }

        self.expected = expected;

        info!(
            patients   = self.patients.len(),
            facilities = self.facilities.len(),
            expected   = self.expected.total(),
            "environment reset"
        );
        Ok(())
    }

    /// Draw one valid patient location from the placement distribution.
    pub fn random_patient_location(&self, rng: &mut SimRng) -> SosResult<Location> {
        sample_patient_location(
            self.width,
            self.height,
            &self.facilities,
            self.max_placement_attempts,
            rng,
        )
    }

    // ── Per-tick effects ──────────────────────────────────────────────────

    /// Exogenous effect: every patient loses one unit of vitality.
    pub fn bleed(&mut self) {
        for patient in &mut self.patients {
            patient.bleed();
        }
    }

    /// Claim the first still-`Initial` patient at `location`.
    ///
    /// The claimed patient transitions to `Discovered` before it is returned,
    /// so repeated calls at one cell yield distinct patients until the cell
    /// is exhausted.  Returns `None` (with no mutation) when no undiscovered
    /// patient remains there or `location` is off the grid.
    pub fn take_undiscovered_patient(&mut self, location: Location) -> Option<PatientId> {
        let occupants = self.occupancy.get(location)?;
        let patients = &mut self.patients;
        occupants
            .iter()
            .copied()
            .find(|id| patients[id.index()].discover())
    }

    /// Patients at `location` that have already been discovered.
    ///
    /// Empty for off-grid locations.
    pub fn discovered_patients(&self, location: Location) -> impl Iterator<Item = PatientId> + '_ {
        self.occupancy
            .get(location)
            .into_iter()
            .flatten()
            .copied()
            .filter(|id| self.patients[id.index()].is_discovered())
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    #[inline]
    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.get(id.index())
    }

    /// Actual per-cell patient occupancy.
    #[inline]
    pub fn occupancy(&self) -> &Grid<Vec<PatientId>> {
        &self.occupancy
    }

    /// The expected-density prior.
    #[inline]
    pub fn expected_density(&self) -> &Grid<u32> {
        &self.expected
    }

    #[inline]
    pub fn facilities(&self) -> &[Location] {
        &self.facilities
    }

    /// Number of patients currently `Discovered`.
    pub fn discovered_count(&self) -> usize {
        self.patients.iter().filter(|p| p.is_discovered()).count()
    }
}
