//! Time-of-day reward patterns.

use rustc_hash::FxHashMap;

use ct_core::{RestaurantId, TimeBlock};

/// Restaurant → per-[`TimeBlock`] exponential moving average of rewards.
#[derive(Clone, Debug, Default)]
pub struct TimePatternTable {
    table: FxHashMap<RestaurantId, [f64; TimeBlock::COUNT]>,
}

impl TimePatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an all-zero row for every id that has none.
    pub fn initialise(&mut self, restaurants: impl IntoIterator<Item = RestaurantId>) {
        for id in restaurants {
            self.table.entry(id).or_insert([0.0; TimeBlock::COUNT]);
        }
    }

    /// EMA value for `(restaurant, block)`; `0.0` with no history.
    #[inline]
    pub fn get(&self, restaurant: RestaurantId, block: TimeBlock) -> f64 {
        self.table.get(&restaurant).map_or(0.0, |row| row[block.index()])
    }

    /// `new = old·(1 − α) + reward·α`.  Returns the new value.
    pub fn update(&mut self, restaurant: RestaurantId, block: TimeBlock, reward: f64, alpha: f64) -> f64 {
        let row = self.table.entry(restaurant).or_insert([0.0; TimeBlock::COUNT]);
        let slot = &mut row[block.index()];
        *slot = *slot * (1.0 - alpha) + reward * alpha;
        *slot
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
