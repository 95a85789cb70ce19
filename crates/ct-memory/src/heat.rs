//! Per-courier heat map.

use rustc_hash::FxHashMap;

use ct_core::RestaurantId;

const DEMAND_WEIGHT: f64 = 0.6;
const DISTANCE_WEIGHT: f64 = 0.3;
const COMPETITION_WEIGHT: f64 = 0.1;

/// Beyond this distance a restaurant earns no proximity score.
pub const DISTANCE_HORIZON: f64 = 20.0;

/// With this many waiting couriers nearby a restaurant earns no competition
/// score.
pub const COMPETITION_HORIZON: f64 = 5.0;

/// Restaurant → location score.
#[derive(Clone, Debug, Default)]
pub struct HeatMap {
    scores: FxHashMap<RestaurantId, f64>,
}

impl HeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialise(&mut self, restaurants: impl IntoIterator<Item = RestaurantId>) {
        for id in restaurants {
            self.scores.entry(id).or_insert(0.0);
        }
    }

    /// `0.6·demand + 0.3·max(0, 20 − distance) + 0.1·max(0, 5 − waiting)`.
    ///
    /// Bounded above by `0.6·demand + 6.5`.
    #[inline]
    pub fn score(demand: f64, distance: f64, nearby_waiting: usize) -> f64 {
        DEMAND_WEIGHT * demand
            + DISTANCE_WEIGHT * (DISTANCE_HORIZON - distance).max(0.0)
            + COMPETITION_WEIGHT * (COMPETITION_HORIZON - nearby_waiting as f64).max(0.0)
    }

    pub fn update(&mut self, restaurant: RestaurantId, demand: f64, distance: f64, nearby_waiting: usize) {
        self.scores.insert(restaurant, Self::score(demand, distance, nearby_waiting));
    }

    #[inline]
    pub fn score_of(&self, restaurant: RestaurantId) -> f64 {
        self.scores.get(&restaurant).copied().unwrap_or(0.0)
    }

    /// Highest-scoring restaurant whose score is strictly above `threshold`.
    /// Ties go to the lowest id.
    pub fn best_above(&self, threshold: f64) -> Option<(RestaurantId, f64)> {
        let mut best: Option<(RestaurantId, f64)> = None;
        for (&id, &score) in &self.scores {
            if score <= threshold {
                continue;
            }
            best = match best {
                Some((bid, bs)) if bs > score || (bs == score && bid < id) => Some((bid, bs)),
                _ => Some((id, score)),
            };
        }
        best
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
