//! Deterministic planner RNG.
//!
//! # Determinism strategy
//!
//! Nothing in the planner reads process-global randomness.  Every optimizer
//! owns a `PlannerRng` seeded from configuration, and batch planning derives
//! one child RNG per job:
//!
//!   seed = config_seed XOR (job_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive job indices uniformly across the seed space, so
//! jobs never share RNG state and results do not depend on which thread ran
//! which job.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seedable RNG used by the delivery-order optimizer.
///
/// Implements [`RngCore`], so any `rand` API (`gen_range`, distributions,
/// `SliceRandom`) works on it directly.
#[derive(Clone, Debug)]
pub struct PlannerRng(SmallRng);

impl PlannerRng {
    pub fn new(seed: u64) -> Self {
        PlannerRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically for the `index`-th job of a batch run.
    pub fn for_job(seed: u64, index: usize) -> Self {
        PlannerRng(SmallRng::seed_from_u64(
            seed ^ (index as u64).wrapping_mul(MIXING_CONSTANT),
        ))
    }
}

impl RngCore for PlannerRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}
