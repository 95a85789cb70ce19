//! Job arrival process.

use tracing::warn;

use ct_core::{JobId, SimConfig, SimRng, Tick};
use ct_world::World;

use crate::JobRegistry;

/// At most one job per tick, posted with probability `arrival_rate / 100`.
#[derive(Clone, Debug)]
pub struct ArrivalProcess {
    probability: f64,
}

impl ArrivalProcess {
    pub fn new(config: &SimConfig) -> Self {
        Self::with_probability(config.arrival_probability())
    }

    pub fn with_probability(probability: f64) -> Self {
        Self { probability: probability.clamp(0.0, 1.0) }
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Run this tick's Bernoulli trial.  Returns the posted job, if any.
    pub fn tick(&self, registry: &mut JobRegistry, world: &World, now: Tick, rng: &mut SimRng) -> Option<JobId> {
        if !rng.gen_bool(self.probability) {
            return None;
        }
        match registry.create_job(world, now, rng.inner()) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(tick = %now, error = %e, "job arrival skipped");
                None
            }
        }
    }
}
