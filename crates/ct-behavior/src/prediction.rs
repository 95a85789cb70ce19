//! Demand-prediction strategy: heat-map relocation and route re-evaluation.

use ct_core::RestaurantId;
use ct_courier::{Courier, CourierStatus, Relocation};
use ct_memory::CourierKnowledge;

use crate::{should_switch, DecisionContext, DecisionStrategy, HeldJob, SwitchDecision};

/// Level-3 strategy.  Predictions and the heat map are only maintained once
/// the courier has completed its first job; before that it behaves like
/// level 2.
pub struct PredictionStrategy;

impl DecisionStrategy for PredictionStrategy {
    fn name(&self) -> &'static str {
        "demand-prediction"
    }

    fn observe(&self, courier: &Courier, knowledge: &mut CourierKnowledge, ctx: &DecisionContext<'_>) {
        if !courier.has_completed_first_job {
            return;
        }
        knowledge.refresh_predictions(ctx.world.restaurant_ids(), ctx.block);
        for r in &ctx.world.restaurants {
            let demand = knowledge.predictor.predicted(r.id);
            let distance = courier.location.distance(r.location);
            knowledge.heat.update(r.id, demand, distance, ctx.waiting_near(r.id));
        }
    }

    fn choose_rest(
        &self,
        courier:   &Courier,
        knowledge: &CourierKnowledge,
        ctx:       &DecisionContext<'_>,
    ) -> Option<(RestaurantId, Relocation)> {
        if !courier.has_completed_first_job {
            return None;
        }
        knowledge
            .heat
            .best_above(ctx.config.free_moving_threshold)
            .map(|(r, _)| (r, Relocation::Prediction))
    }

    fn reevaluate(
        &self,
        courier:   &Courier,
        knowledge: &CourierKnowledge,
        ctx:       &DecisionContext<'_>,
    ) -> SwitchDecision {
        if courier.status != CourierStatus::MovingToRestaurant || courier.must_reach_rest {
            return SwitchDecision::Keep;
        }
        let Some(best) = ctx.jobs.best_available_within(ctx.world, courier.location, ctx.config.neighbourhood_size)
        else {
            return SwitchDecision::Keep;
        };

        let held = match courier.current_job {
            Some(id) => match ctx.jobs.get(id) {
                Some(job) => Some(HeldJob {
                    reward: job.reward,
                    remaining: courier.next_destination.map_or(0.0, |d| courier.location.distance(d)),
                    trip_length: job.trip_length(),
                }),
                // Unknown held job: leave it to the engine's lookup-miss path.
                None => return SwitchDecision::Keep,
            },
            None => None,
        };
        let return_prediction = courier.target_restaurant.map(|r| knowledge.predictor.predicted(r));

        if should_switch(
            best.reward,
            held,
            return_prediction,
            ctx.config.opportunistic_switch,
            ctx.config.switch_factor(),
        ) {
            SwitchDecision::Take(best.id)
        } else {
            SwitchDecision::Keep
        }
    }

    fn on_delivery(
        &self,
        origin:    RestaurantId,
        reward:    f64,
        knowledge: &mut CourierKnowledge,
        ctx:       &DecisionContext<'_>,
    ) {
        knowledge.update_temporal_patterns(origin, ctx.block, reward, ctx.config.learning_rate);
    }
}
