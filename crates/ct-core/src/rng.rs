//! Seeded random streams.
//!
//! A run draws from two kinds of stream:
//!
//! - [`SimRng`]: the run-level stream and the child streams split off it
//!   (world layout, courier placement, visiting order, job arrivals).
//! - [`CourierRng`]: one per courier, used for wander turns and for picking
//!   among several nearby jobs.
//!
//! A courier's stream is seeded from `(seed, courier id)` alone, so the order
//! in which couriers are visited never changes what any one of them draws.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::CourierId;

/// Golden-ratio multiplier used to spread ids and stream offsets over the
/// seed space.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── CourierRng ────────────────────────────────────────────────────────────────

/// Per-courier stream.  Lives in `CourierRngs`, beside the courier records,
/// so the engine can borrow both mutably at once.
pub struct CourierRng(SmallRng);

impl CourierRng {
    pub fn new(seed: u64, courier: CourierId) -> Self {
        let mixed = seed ^ (courier.0 as u64).wrapping_mul(MIXING_CONSTANT);
        CourierRng(SmallRng::seed_from_u64(mixed))
    }

    /// Uniform draw from `range`; used for the wander turn.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform pick from `candidates`, `None` when empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        candidates.choose(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Run-level stream.  Split it with [`child`](SimRng::child) so each concern
/// consumes its own sequence.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Split off an independent stream.  Children are taken in a fixed order
    /// at build time, so `offset` only has to differ between them.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// The underlying generator, for APIs generic over `R: Rng`.
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

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Bernoulli trial; `p` is clamped to `[0, 1]`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// In-place Fisher-Yates shuffle; drives the per-tick courier order.
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
