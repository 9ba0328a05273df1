//! Deterministic RNG for synthetic network generation.
//!
//! # Determinism strategy
//!
//! Every major road gets its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (road_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive road indices uniformly across the seed space.
//! Appending a road to the input list therefore leaves the jitter of every
//! earlier road untouched, and two generators built from the same seed and
//! inputs produce identical networks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded generator used wherever generation needs randomness.
pub struct GenRng(SmallRng);

impl GenRng {
    pub fn new(seed: u64) -> Self {
        GenRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from the run's global seed and a stream index
    /// (e.g. the position of a road in the input list).
    pub fn for_stream(global_seed: u64, stream: u64) -> Self {
        let seed = global_seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        GenRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform value in `[-amplitude, amplitude]`; `0.0` when the amplitude is
    /// not positive.
    #[inline]
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        if amplitude > 0.0 {
            self.0.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        }
    }
}
