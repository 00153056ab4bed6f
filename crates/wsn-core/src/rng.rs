//! Deterministic simulation RNG.
//!
//! The buffer simulator draws every arrival from one `SimRng` in a fixed
//! order (slot by slot, node by node ascending), so a given seed always
//! reproduces the same run.  Independent replications each get a fresh
//! `SimRng` seeded from their own seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts.  For parallel replications give
/// each worker its own `SimRng` built from a distinct seed.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand_distr` distributions.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
