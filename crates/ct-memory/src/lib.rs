//! `ct-memory`: what a courier knows about the restaurants.
//!
//! Every courier exclusively owns one [`CourierKnowledge`]; nothing in here
//! is shared between couriers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`reward`]    | `RewardMemory`: bounded newest-first reward lists          |
//! | [`fade`]      | the fade models applied to a single reward list            |
//! | [`patterns`]  | `TimePatternTable`: EMA reward per restaurant × time block |
//! | [`predictor`] | `DemandPredictor`: blended prediction + error history      |
//! | [`heat`]      | `HeatMap`: demand / distance / competition score           |
//!
//! All tables are keyed by `RestaurantId` in an `FxHashMap`.  A lookup for a
//! restaurant the courier has never seen yields `0.0`, never an error.

pub mod fade;
pub mod heat;
pub mod patterns;
pub mod predictor;
pub mod reward;


pub use fade::{fade_list, recency_weights};
pub use heat::HeatMap;
pub use patterns::TimePatternTable;
pub use predictor::{DemandPredictor, PredictionError, ERROR_HISTORY_CAPACITY};
pub use reward::RewardMemory;

use ct_core::{RestaurantId, SimConfig, TimeBlock};

/// The four per-courier tables, bundled so the courier store can hold them in
/// one parallel `Vec`.
#[derive(Clone, Debug)]
pub struct CourierKnowledge {
    pub memory:    RewardMemory,
    pub patterns:  TimePatternTable,
    pub predictor: DemandPredictor,
    pub heat:      HeatMap,
}

impl CourierKnowledge {
    /// Fresh tables with a zero entry for every restaurant in `restaurants`.
    pub fn new(config: &SimConfig, restaurants: impl IntoIterator<Item = RestaurantId> + Clone) -> Self {
        let mut patterns = TimePatternTable::new();
        patterns.initialise(restaurants.clone());
        let mut heat = HeatMap::new();
        heat.initialise(restaurants.clone());
        Self {
            memory: RewardMemory::new(config.level_of_order),
            patterns,
            predictor: DemandPredictor::new(config.start_prediction_weight, restaurants),
            heat,
        }
    }

    /// Fold a delivered reward into the time-pattern table and settle the
    /// standing prediction for that restaurant against it.
    pub fn update_temporal_patterns(
        &mut self,
        restaurant: RestaurantId,
        block: TimeBlock,
        reward: f64,
        learning_rate: f64,
    ) {
        self.patterns.update(restaurant, block, reward, learning_rate);
        self.predictor.record_outcome(restaurant, reward);
    }

    /// Recompute every prediction for `block` from the patterns and memory.
    pub fn refresh_predictions(&mut self, restaurants: impl IntoIterator<Item = RestaurantId>, block: TimeBlock) {
        self.predictor.refresh(restaurants, &self.patterns, &self.memory, block);
    }
}
