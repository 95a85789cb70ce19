//! Memory relocation rules (autonomy level 2, and the level-3 fallback).

use ct_core::{RestaurantId, SimConfig};
use ct_memory::RewardMemory;

/// The cached best remembered restaurant, if relocating there is worth it:
/// memory is on, its summed rewards exceed `free_moving_threshold`, and it is
/// not `current`.
pub fn memory_rest_choice(
    memory:  &RewardMemory,
    config:  &SimConfig,
    current: Option<RestaurantId>,
) -> Option<RestaurantId> {
    if !config.use_memory {
        return None;
    }
    let best = memory.current_best()?;
    (memory.current_highest_reward() > config.free_moving_threshold && Some(best) != current)
        .then_some(best)
}

/// `true` once everything the courier remembers has faded to the threshold
/// or below.  A courier with no memory yet keeps waiting.
pub fn should_give_up_waiting(memory: &RewardMemory, config: &SimConfig) -> bool {
    config.use_memory
        && memory.current_best().is_some()
        && memory.current_highest_reward() <= config.free_moving_threshold
}
