//! Seeded random source owned by a game state

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Deterministic RNG. Two states built from the same seed and fed the same
/// inputs draw identical sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimRng {
    pub seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform in [lo, hi); returns `lo` for an empty range
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo).max(0.0)
    }

    /// Uniform in [-half_width, half_width)
    #[inline]
    pub fn spread(&mut self, half_width: f32) -> f32 {
        (self.unit() - 0.5) * 2.0 * half_width
    }

    /// Bernoulli trial
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform index in [0, len)
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}
