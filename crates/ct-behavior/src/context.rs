//! Read-only simulation state passed to every strategy callback.

use ct_core::{RestaurantId, SimConfig, Tick, TimeBlock};
use ct_jobs::JobRegistry;
use ct_world::World;

/// A read-only snapshot of the simulation built by the engine for each
/// courier update.  It holds borrows only; building one is free.
pub struct DecisionContext<'a> {
    pub tick: Tick,
    pub block: TimeBlock,
    pub config: &'a SimConfig,
    pub world: &'a World,
    pub jobs: &'a JobRegistry,
    /// Waiting couriers within `neighbourhood_size` of each restaurant,
    /// indexed by `RestaurantId`.  Computed once per tick.
    pub nearby_waiting: &'a [usize],
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(
        tick:           Tick,
        config:         &'a SimConfig,
        world:          &'a World,
        jobs:           &'a JobRegistry,
        nearby_waiting: &'a [usize],
    ) -> Self {
        Self { tick, block: tick.time_block(), config, world, jobs, nearby_waiting }
    }

    /// `0` for restaurants outside the snapshot.
    #[inline]
    pub fn waiting_near(&self, restaurant: RestaurantId) -> usize {
        self.nearby_waiting.get(restaurant.index()).copied().unwrap_or(0)
    }
}
