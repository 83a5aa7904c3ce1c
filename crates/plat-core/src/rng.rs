//! Per-platform deterministic random streams.
//!
//! A platform's stream is seeded from the run seed and its `PlatformId`:
//!
//!   seed = run_seed XOR (platform_id * GOLDEN_GAMMA)
//!
//! so each platform draws the same values no matter how many other
//! platforms sample, or in which order.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::PlatformId;

/// Fractional part of the golden ratio as a 64-bit integer.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed for `platform`'s stream within a run seeded with `run_seed`.
#[inline]
pub fn platform_seed(run_seed: u64, platform: PlatformId) -> u64 {
    run_seed ^ u64::from(platform.0).wrapping_mul(GOLDEN_GAMMA)
}

/// Random stream owned by one platform, used to sample its action space.
pub struct PlatformRng(SmallRng);

impl PlatformRng {
    pub fn new(run_seed: u64, platform: PlatformId) -> Self {
        PlatformRng(SmallRng::seed_from_u64(platform_seed(run_seed, platform)))
    }

    /// The underlying generator, for `rand` distributions and `gen_range`.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}
