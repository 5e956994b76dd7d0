//! Deterministic per-owner and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each owning player gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (player_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive player IDs uniformly across the seed space.
//! Owners never share RNG state, so the order in which owners are processed
//! within a turn cannot perturb another owner's decision stream, and replays
//! from a fixed seed stay bit-identical.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::PlayerId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── OwnerRng ──────────────────────────────────────────────────────────────────

/// Per-owner deterministic RNG.
///
/// Created once per AI player at setup; every random decision made on behalf
/// of that player's agents draws from here.
pub struct OwnerRng(SmallRng);

impl OwnerRng {
    /// Seed deterministically from the run's global seed and a player ID.
    pub fn new(global_seed: u64, owner: PlayerId) -> Self {
        let seed = global_seed ^ (owner.0 as u64).wrapping_mul(MIXING_CONSTANT);
        OwnerRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
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

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (world generation, exogenous
/// events).  Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child rng with a different seed offset — useful for seeding
    /// per-owner RNGs deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
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
}
