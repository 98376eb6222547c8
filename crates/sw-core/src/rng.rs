//! Deterministic RNG wrapper for maze generation and robot placement.
//!
//! Everything random in a run derives from `SwarmConfig::seed`, so a given
//! seed always yields the same maze and the same start cells.  Independent
//! consumers take a [`MazeRng::child`] so that adding a new consumer does not
//! disturb the draws of existing ones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Run-level RNG.
///
/// Used only from the thread that builds the swarm; robots themselves are
/// fully deterministic and hold no RNG.
pub struct MazeRng(SmallRng);

impl MazeRng {
    pub fn new(seed: u64) -> Self {
        MazeRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `MazeRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> MazeRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        MazeRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
