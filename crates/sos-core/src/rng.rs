//! The simulation's single shared random stream.
//!
//! # Determinism strategy
//!
//! Every random draw in a run (patient placement, movement-cost
//! uncertainty, tie-break shuffles) comes from one `SmallRng` seeded from
//! `ScenarioConfig::seed`.  The stream is owned by the world and passed
//! explicitly (`&mut SimRng`) into every agent callback; nothing reaches for
//! an ambient generator.  This means:
//!
//! - The same seed, agent registry order, and candidate-construction order
//!   always reproduce a run bit-for-bit.
//! - Reordering agents, or adding a draw anywhere, changes every later draw.
//!   Registry order is part of the reproducibility contract.
//! - `SimRng` is not `Clone`; there is exactly one stream per world.

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-wide deterministic RNG.
pub struct SimRng {
    seed:  u64,
    inner: SmallRng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng { seed, inner: SmallRng::seed_from_u64(seed) }
    }

    /// The seed this stream was (last) started from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from its original seed.
    ///
    /// Called by the world on every scenario reset so that reset is
    /// idempotent: all derived state is a function of configuration + seed.
    pub fn reseed(&mut self) {
        self.inner = SmallRng::seed_from_u64(self.seed);
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Draw one value from `dist` (e.g. a `statrs` normal distribution).
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.inner)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
