//! Fluent builder for constructing a [`Sim`].

use ct_behavior::{select_strategy, DecisionStrategy};
use ct_core::{AutonomyLevel, RestaurantId, SimClock, SimConfig, SimRng};
use ct_courier::CourierStoreBuilder;
use ct_jobs::{ArrivalProcess, JobRegistry, RestaurantView};
use ct_world::{World, WorldBuilder};

use crate::{Sim, SimError, SimResult, SimState};

/// Stream offsets for the child RNGs drawn from the master seed.
const LAYOUT_STREAM: u64 = 1;
const PLACEMENT_STREAM: u64 = 2;
const ORDER_STREAM: u64 = 3;
const ARRIVAL_STREAM: u64 = 4;

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                         |
/// |--------------------|-------------------------------------------------|
/// | `.world(w)`        | `WorldBuilder::clustered(config, ..)`           |
/// | `.placements(v)`   | Every courier at a uniformly random restaurant  |
/// | `.strategy(s)`     | `select_strategy(config)`                       |
///
/// # Example
///
/// ```rust
/// use ct_core::SimConfig;
/// use ct_sim::{NoopObserver, SimBuilder};
///
/// let config = SimConfig { total_ticks: 100, courier_population: 4, ..SimConfig::default() };
/// let mut sim = SimBuilder::new(config).build().unwrap();
/// sim.run(&mut NoopObserver).unwrap();
/// assert_eq!(sim.clock.current_tick.0, 100);
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    world:      Option<World>,
    placements: Vec<RestaurantId>,
    strategy:   Option<Box<dyn DecisionStrategy>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, world: None, placements: Vec::new(), strategy: None }
    }

    /// Use a hand-built world instead of generating the clustered layout.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Start restaurant for the first `placements.len()` couriers.
    pub fn placements(mut self, placements: impl IntoIterator<Item = RestaurantId>) -> Self {
        self.placements = placements.into_iter().collect();
        self
    }

    /// Override the level-3 strategy.  Ignored below the highest autonomy
    /// level.
    pub fn strategy(mut self, strategy: Box<dyn DecisionStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Validate inputs, lay out the world and couriers, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let population = self.config.courier_population;
        if self.placements.len() > population {
            return Err(SimError::CourierCountMismatch {
                expected: population,
                got:      self.placements.len(),
                what:     "placements",
            });
        }

        let mut rng = SimRng::new(self.config.seed);
        let world = match self.world {
            Some(w) => w,
            None => WorldBuilder::clustered(&self.config, &mut rng.child(LAYOUT_STREAM))?,
        };
        for &r in &self.placements {
            world.try_location_of(r)?;
        }

        let (store, rngs) = CourierStoreBuilder::new(&self.config)
            .with_placements(self.placements)
            .build(&world, &mut rng.child(PLACEMENT_STREAM));

        let strategy = if self.config.autonomy_level == AutonomyLevel::High {
            self.strategy.or_else(|| select_strategy(&self.config))
        } else {
            None
        };

        Ok(Sim {
            clock:          SimClock::new(),
            arrivals:       ArrivalProcess::new(&self.config),
            view:           RestaurantView::new(&world),
            jobs:           JobRegistry::new(),
            state:          SimState::default(),
            order_rng:      rng.child(ORDER_STREAM),
            arrival_rng:    rng.child(ARRIVAL_STREAM),
            order:          Vec::with_capacity(population),
            nearby_waiting: Vec::with_capacity(world.restaurant_count()),
            events:         Vec::new(),
            config:         self.config,
            world,
            store,
            rngs,
            strategy,
        })
    }
}
