//! Builder for `CourierStore` + `CourierRngs`.
//!
//! ```rust
//! use ct_core::{SimConfig, SimRng};
//! use ct_courier::CourierStoreBuilder;
//! use ct_world::WorldBuilder;
//!
//! let config = SimConfig { courier_population: 8, ..SimConfig::default() };
//! let mut rng = SimRng::new(config.seed);
//! let world = WorldBuilder::clustered(&config, &mut rng).unwrap();
//!
//! let (store, rngs) = CourierStoreBuilder::new(&config).build(&world, &mut rng);
//! assert_eq!(store.len(), 8);
//! assert_eq!(rngs.len(), 8);
//! ```

use ct_core::{CourierId, RestaurantId, SimConfig, SimRng};
use ct_memory::CourierKnowledge;
use ct_world::World;

use crate::{Courier, CourierRngs, CourierStore};

pub struct CourierStoreBuilder<'a> {
    config: &'a SimConfig,
    placements: Vec<RestaurantId>,
}

impl<'a> CourierStoreBuilder<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config, placements: Vec::new() }
    }

    /// Fix the start restaurant of the first `placements.len()` couriers
    /// instead of drawing them.
    pub fn with_placements(mut self, placements: impl IntoIterator<Item = RestaurantId>) -> Self {
        self.placements = placements.into_iter().collect();
        self
    }

    /// Place every courier, waiting, at a restaurant (fixed placements first,
    /// then uniformly random ones) and give it fresh tables.  Unknown fixed
    /// placements are redrawn.
    pub fn build(self, world: &World, rng: &mut SimRng) -> (CourierStore, CourierRngs) {
        let count = self.config.courier_population;
        let mut couriers = Vec::with_capacity(count);
        let mut knowledge = Vec::with_capacity(count);

        for i in 0..count {
            let fixed = self.placements.get(i).copied().filter(|&r| world.restaurant(r).is_some());
            let restaurant = fixed.or_else(|| world.random_restaurant(rng.inner()));
            let (restaurant, location) = match restaurant.and_then(|r| world.location_of(r).map(|p| (r, p))) {
                Some(found) => found,
                None => (RestaurantId::INVALID, world.random_point(rng.inner())),
            };
            couriers.push(Courier::new(CourierId(i as u32), restaurant, location));
            knowledge.push(CourierKnowledge::new(self.config, world.restaurant_ids()));
        }

        (CourierStore { couriers, knowledge }, CourierRngs::new(count, self.config.seed))
    }
}
