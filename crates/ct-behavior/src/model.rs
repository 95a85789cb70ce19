//! The `DecisionStrategy` trait: the extension point for the highest
//! autonomy tier.

use ct_core::{AutonomyLevel, LearningModel, RestaurantId, SimConfig};
use ct_courier::{Courier, Relocation};
use ct_memory::CourierKnowledge;

use crate::{DecisionContext, LearningStrategy, PredictionStrategy, SwitchDecision};

/// Pluggable decision logic consulted by the engine for level-3 couriers.
///
/// Every method has a no-op default, so an empty `impl` behaves exactly like
/// autonomy level 2 (the engine falls back to the memory policy whenever a
/// strategy declines to choose).
///
/// Strategies are stateless and shared by all couriers; per-courier state
/// lives in the [`CourierKnowledge`] passed in.
pub trait DecisionStrategy: Send + Sync + 'static {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Called once per courier per tick, before the courier acts.  Refresh
    /// derived tables here.
    fn observe(
        &self,
        _courier:   &Courier,
        _knowledge: &mut CourierKnowledge,
        _ctx:       &DecisionContext<'_>,
    ) {
    }

    /// Pick a rest restaurant for an idle courier, or `None` to defer to the
    /// memory policy.
    fn choose_rest(
        &self,
        _courier:   &Courier,
        _knowledge: &CourierKnowledge,
        _ctx:       &DecisionContext<'_>,
    ) -> Option<(RestaurantId, Relocation)> {
        None
    }

    /// Re-evaluate the current route while `moving_to_restaurant`.
    fn reevaluate(
        &self,
        _courier:   &Courier,
        _knowledge: &CourierKnowledge,
        _ctx:       &DecisionContext<'_>,
    ) -> SwitchDecision {
        SwitchDecision::Keep
    }

    /// Fold a delivered reward into the courier's learned tables.
    fn on_delivery(
        &self,
        _origin:    RestaurantId,
        _reward:    f64,
        _knowledge: &mut CourierKnowledge,
        _ctx:       &DecisionContext<'_>,
    ) {
    }
}

/// The strategy the configuration asks for, or `None` below level 3.
pub fn select_strategy(config: &SimConfig) -> Option<Box<dyn DecisionStrategy>> {
    if config.autonomy_level < AutonomyLevel::High {
        return None;
    }
    Some(match config.learning_model {
        LearningModel::DemandPrediction      => Box::new(PredictionStrategy),
        LearningModel::LearningAndAdaptation => Box::new(LearningStrategy),
    })
}
