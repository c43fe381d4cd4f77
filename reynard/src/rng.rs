//! Deterministic, splittable random source consumed by generation.

use rand::distributions::uniform::SampleUniform;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic pseudo-random stream owned by exactly one draw.
///
/// A source is never shared: composite generators [`split`](RandomSource::split)
/// it into independent descendants instead of threading one mutable RNG
/// through every sub-draw. The same seed always yields the same sequence of
/// draws and the same tree of splits, on every platform.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    /// Create a source from a seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consume this source and produce two independent descendants
    pub fn split(mut self) -> (RandomSource, RandomSource) {
        let left = self.rng.next_u64();
        let right = self.rng.next_u64();
        (Self::from_seed(left), Self::from_seed(right))
    }

    /// Consume this source and produce `count` independent descendants
    pub fn split_n(self, count: usize) -> Vec<RandomSource> {
        let mut sources = Vec::with_capacity(count);
        let mut rest = self;
        for _ in 0..count {
            let (next, remaining) = rest.split();
            sources.push(next);
            rest = remaining;
        }
        sources
    }

    /// Draw a value uniformly from `[lo, hi]` (both ends inclusive)
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn next_in_range<T>(&mut self, lo: T, hi: T) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.gen_range(lo..=hi)
    }

    /// Draw a raw 64-bit value
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Draw a value uniformly from the unit interval `[0, 1)`
    pub fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Produce a fresh seed for runs that did not ask for a specific one.
///
/// The seed is kept small so it is easy to copy out of a failure report.
pub fn fresh_seed() -> u64 {
    u64::from(rand::thread_rng().next_u32())
}
