//! Reinforcement-learning extension point.

use crate::DecisionStrategy;

/// Placeholder for the learning-and-adaptation model.  Every hook keeps its
/// no-op default, so couriers behave as autonomy level 2.
pub struct LearningStrategy;

impl DecisionStrategy for LearningStrategy {
    fn name(&self) -> &'static str {
        "learning-and-adaptation"
    }
}
