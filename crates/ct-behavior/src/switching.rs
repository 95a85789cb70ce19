//! Route re-evaluation rules.
//!
//! With `best` the highest-reward available job in the neighbourhood and
//! `f = 1 + switch_threshold%`:
//!
//! | opportunistic | holding | switch iff                                        |
//! |---------------|---------|---------------------------------------------------|
//! | yes           | yes     | `best > current·f`                                |
//! | yes           | no      | always                                            |
//! | no            | no      | no return target, or `best > predicted(target)·f` |
//! | no            | yes     | `best > current·f` and `best > cost + current`    |
//!
//! where `cost = current · remaining / trip_length`.

use ct_core::JobId;

/// Guards the progress ratio against a zero-length trip.
const TRIP_EPSILON: f64 = 1e-9;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SwitchDecision {
    Keep,
    Take(JobId),
}

/// The job a courier currently holds, as seen by the switching rule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeldJob {
    pub reward: f64,
    /// Distance still to cover on the current leg.
    pub remaining: f64,
    /// Origin → destination distance.
    pub trip_length: f64,
}

impl HeldJob {
    /// Reward forfeited by abandoning the job now.
    #[inline]
    pub fn abandon_cost(&self) -> f64 {
        self.reward * self.remaining / self.trip_length.max(TRIP_EPSILON)
    }
}

/// Decide whether a candidate of `best_reward` replaces the current plan.
///
/// `return_prediction` is the predicted reward of the courier's specific
/// return target, or `None` when it has none.
pub fn should_switch(
    best_reward:       f64,
    held:              Option<HeldJob>,
    return_prediction: Option<f64>,
    opportunistic:     bool,
    factor:            f64,
) -> bool {
    match (opportunistic, held) {
        (true, Some(job)) => best_reward > job.reward * factor,
        (true, None) => true,
        (false, None) => return_prediction.is_none_or(|p| best_reward > p * factor),
        (false, Some(job)) => {
            best_reward > job.reward * factor && best_reward > job.abandon_cost() + job.reward
        }
    }
}
