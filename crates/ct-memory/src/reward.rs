//! Bounded per-restaurant reward memory.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use ct_core::{FadeStrategy, RestaurantId};

use crate::fade::fade_list;

/// Restaurant → newest-first list of rewards earned there.
///
/// Each list holds at most `capacity` entries; recording into a full list
/// evicts the oldest.  The best restaurant (maximum summed memory) is cached
/// by [`find_best_restaurant`](Self::find_best_restaurant) and read back
/// through [`current_best`](Self::current_best) between refreshes.
#[derive(Clone, Debug)]
pub struct RewardMemory {
    capacity: usize,
    lists: FxHashMap<RestaurantId, VecDeque<f64>>,
    best: Option<RestaurantId>,
    highest: f64,
}

impl RewardMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lists: FxHashMap::default(),
            best: None,
            highest: 0.0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of restaurants with a list.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Push `reward` to the front of `restaurant`'s list.
    pub fn record(&mut self, restaurant: RestaurantId, reward: f64) {
        let cap = self.capacity;
        let list = self.lists.entry(restaurant).or_insert_with(|| VecDeque::with_capacity(cap));
        list.push_front(reward);
        list.truncate(cap);
    }

    /// Newest-first rewards for `restaurant` (empty if never visited).
    pub fn rewards(&self, restaurant: RestaurantId) -> impl Iterator<Item = f64> + '_ {
        self.lists.get(&restaurant).into_iter().flat_map(|l| l.iter().copied())
    }

    pub fn sum(&self, restaurant: RestaurantId) -> f64 {
        self.rewards(restaurant).sum()
    }

    /// Mean of the non-zero entries, or `0.0` when there are none.
    pub fn recent_mean(&self, restaurant: RestaurantId) -> f64 {
        let (total, n) = self
            .rewards(restaurant)
            .filter(|&v| v != 0.0)
            .fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
        if n == 0 { 0.0 } else { total / n as f64 }
    }

    /// Fade every list with the globally selected model.
    pub fn fade(&mut self, strategy: FadeStrategy, rate: f64) {
        for list in self.lists.values_mut() {
            fade_list(list, strategy, rate);
        }
    }

    /// Recompute and cache the restaurant with the maximum summed memory.
    /// Ties go to the lowest id.
    pub fn find_best_restaurant(&mut self) -> Option<(RestaurantId, f64)> {
        let mut best: Option<(RestaurantId, f64)> = None;
        for (&id, list) in &self.lists {
            let sum: f64 = list.iter().sum();
            best = match best {
                Some((bid, bsum)) if bsum > sum || (bsum == sum && bid < id) => Some((bid, bsum)),
                _ => Some((id, sum)),
            };
        }
        self.best = best.map(|(id, _)| id);
        self.highest = best.map_or(0.0, |(_, s)| s);
        best
    }

    /// Cached result of the last [`find_best_restaurant`](Self::find_best_restaurant).
    #[inline]
    pub fn current_best(&self) -> Option<RestaurantId> {
        self.best
    }

    #[inline]
    pub fn current_highest_reward(&self) -> f64 {
        self.highest
    }

    /// Largest list length; used by audits.
    pub fn longest_list(&self) -> usize {
        self.lists.values().map(VecDeque::len).max().unwrap_or(0)
    }
}
