//! Per-tick movement on the open plane.
//!
//! Two tolerances are in play and they must not be merged:
//!
//! - [`SNAP_TOLERANCE`]: inside it a moving courier lands exactly on its
//!   target instead of stepping past it;
//! - [`ARRIVAL_TOLERANCE`]: inside it the engine fires completion events.
//!
//! A step that would leave the world is retried once with the heading
//! turned by [`BLOCKED_TURN`]; if that is blocked too the courier stays put.

use std::f64::consts::PI;

use ct_core::{CourierRng, Point, ARRIVAL_TOLERANCE, SNAP_TOLERANCE};
use ct_world::World;

use crate::Courier;

/// Heading perturbation for a blocked step (45°).
pub const BLOCKED_TURN: f64 = PI / 4.0;

/// Maximum heading change per wander tick (30°).
pub const WANDER_TURN: f64 = PI / 6.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    Moved,
    /// Landed exactly on the target.
    Snapped,
    Blocked,
}

/// Move one step of `speed` towards `target`.
pub fn step_toward(courier: &mut Courier, target: Point, speed: f64, world: &World) -> StepOutcome {
    if courier.location.within(target, SNAP_TOLERANCE.max(speed)) {
        courier.location = target;
        return StepOutcome::Snapped;
    }
    courier.heading = courier.location.heading_to(target);
    step_forward(courier, speed, world)
}

/// Random walk: turn by up to ±30° and step forward.
pub fn wander(courier: &mut Courier, rng: &mut CourierRng, speed: f64, world: &World) -> StepOutcome {
    courier.heading += rng.gen_range(-WANDER_TURN..=WANDER_TURN);
    step_forward(courier, speed, world)
}

/// `true` once the courier is within arrival tolerance of `target`.
#[inline]
pub fn has_arrived(courier: &Courier, target: Point) -> bool {
    courier.location.within(target, ARRIVAL_TOLERANCE)
}

/// Step along the current heading, with one 45° retry when blocked.
pub fn step_forward(courier: &mut Courier, speed: f64, world: &World) -> StepOutcome {
    let next = courier.location.advanced(courier.heading, speed);
    if !world.is_blocked(next) {
        courier.location = next;
        return StepOutcome::Moved;
    }
    courier.heading += BLOCKED_TURN;
    let retry = courier.location.advanced(courier.heading, speed);
    if world.is_blocked(retry) {
        return StepOutcome::Blocked;
    }
    courier.location = retry;
    StepOutcome::Moved
}
