//! Demand prediction and its error tracking.
//!
//! A prediction blends the historical time-pattern value for the current
//! block with the mean of recent (non-zero) memory:
//!
//!   predicted = historical·w + recent·(1 − w)
//!
//! `w` is seeded from `start_prediction_weight` and held constant.  After
//! each delivery the absolute error is pushed into a bounded history and the
//! ratio `latest / mean` is recomputed; that ratio is the tuning signal an
//! adaptive weight would consume.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use ct_core::{RestaurantId, TimeBlock};

use crate::{RewardMemory, TimePatternTable};

/// Capacity of the prediction-error history.
pub const ERROR_HISTORY_CAPACITY: usize = 10;

/// Guards the error ratio against a zero mean.
const RATIO_EPSILON: f64 = 1e-9;

/// One settled prediction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PredictionError {
    pub predicted: f64,
    pub actual: f64,
}

impl PredictionError {
    #[inline]
    pub fn abs_error(&self) -> f64 {
        (self.predicted - self.actual).abs()
    }

    /// `max(0, 1 − |p − a| / a)`, or `None` when `a` is not positive.
    pub fn accuracy(&self) -> Option<f64> {
        (self.actual > 0.0).then(|| (1.0 - self.abs_error() / self.actual).max(0.0))
    }
}

#[derive(Clone, Debug)]
pub struct DemandPredictor {
    predictions: FxHashMap<RestaurantId, f64>,
    weight: f64,
    errors: VecDeque<PredictionError>,
    error_ratio: f64,
}

impl DemandPredictor {
    /// Predictor with a zero prediction for every id in `restaurants`.
    pub fn new(start_weight: f64, restaurants: impl IntoIterator<Item = RestaurantId>) -> Self {
        Self {
            predictions: restaurants.into_iter().map(|id| (id, 0.0)).collect(),
            weight: start_weight.clamp(0.0, 1.0),
            errors: VecDeque::with_capacity(ERROR_HISTORY_CAPACITY),
            error_ratio: 1.0,
        }
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Current prediction for `restaurant`; `0.0` with no history.
    #[inline]
    pub fn predicted(&self, restaurant: RestaurantId) -> f64 {
        self.predictions.get(&restaurant).copied().unwrap_or(0.0)
    }

    /// `historical·w + recent·(1 − w)`.
    #[inline]
    pub fn blend(&self, historical: f64, recent: f64) -> f64 {
        historical * self.weight + recent * (1.0 - self.weight)
    }

    /// Recompute the prediction of every restaurant for `block`.
    pub fn refresh(
        &mut self,
        restaurants: impl IntoIterator<Item = RestaurantId>,
        patterns: &TimePatternTable,
        memory: &RewardMemory,
        block: TimeBlock,
    ) {
        for id in restaurants {
            let p = self.blend(patterns.get(id, block), memory.recent_mean(id));
            self.predictions.insert(id, p);
        }
    }

    /// Settle the current prediction for `restaurant` against `actual`.
    pub fn record_outcome(&mut self, restaurant: RestaurantId, actual: f64) {
        let record = PredictionError { predicted: self.predicted(restaurant), actual };
        if self.errors.len() == ERROR_HISTORY_CAPACITY {
            self.errors.pop_front();
        }
        self.errors.push_back(record);

        let mean = self.errors.iter().map(PredictionError::abs_error).sum::<f64>()
            / self.errors.len() as f64;
        self.error_ratio = record.abs_error() / mean.max(RATIO_EPSILON);
    }

    /// Oldest-first error records.
    pub fn errors(&self) -> impl Iterator<Item = &PredictionError> {
        self.errors.iter()
    }

    /// `latest_error / mean_error` from the last settled prediction
    /// (`1.0` before any).
    #[inline]
    pub fn error_ratio(&self) -> f64 {
        self.error_ratio
    }

    /// Mean accuracy over records with a positive actual value.
    pub fn accuracy(&self) -> Option<f64> {
        let (total, n) = self
            .errors
            .iter()
            .filter_map(PredictionError::accuracy)
            .fold((0.0, 0usize), |(t, n), a| (t + a, n + 1));
        (n > 0).then(|| total / n as f64)
    }

    pub fn prediction_count(&self) -> usize {
        self.predictions.len()
    }
}
