//! Deterministic random number generation.
//!
//! The only randomness in the engine is the starting-player pick, but it
//! still goes through a seedable RNG so tests can pin the outcome. Use
//! [`GameRng::new`] with a fixed seed in tests and [`GameRng::from_entropy`]
//! everywhere else.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG used for starting-player randomisation.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
/// The same seed always produces the same sequence.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
