//! The per-courier state machine.
//!
//! ```text
//!              claim at origin                      arrive at destination
//!  searching ─────────────────────────► on_job ─────────────────────────┐
//!  waiting   ──claim away──► moving_to_restaurant ──arrive (to_origin)──┘
//!      ▲         relocate ─►        │                                    │
//!      └────────arrive at rest──────┘      ◄── return / relocate / search┘
//! ```
//!
//! [`Engine`] holds the tick's read-only inputs; every update gets the one
//! courier's record, tables and RNG plus the shared registry and counters.
//! Strategy calls borrow the registry immutably through a
//! [`DecisionContext`] that is dropped before the engine mutates anything.

use tracing::{debug, warn};

use ct_behavior::{
    memory_rest_choice, should_give_up_waiting, DecisionContext, DecisionStrategy, SwitchDecision,
};
use ct_core::{AutonomyLevel, CourierRng, JobId, Point, RestaurantId, SimConfig, Tick, ARRIVAL_TOLERANCE};
use ct_courier::{has_arrived, step_toward, wander, Courier, CourierStatus, Relocation};
use ct_jobs::JobRegistry;
use ct_memory::CourierKnowledge;
use ct_world::World;

use crate::{DeliveryEvent, SimState};

/// Shared mutable state every courier update may touch.
pub(crate) struct Shared<'s> {
    pub jobs:   &'s mut JobRegistry,
    pub state:  &'s mut SimState,
    pub events: &'s mut Vec<DeliveryEvent>,
}

pub(crate) struct Engine<'a> {
    pub now:            Tick,
    pub config:         &'a SimConfig,
    pub world:          &'a World,
    /// `Some` only at the highest autonomy level.
    pub strategy:       Option<&'a dyn DecisionStrategy>,
    pub nearby_waiting: &'a [usize],
}

impl<'a> Engine<'a> {
    fn ctx<'j>(&self, jobs: &'j JobRegistry) -> DecisionContext<'j>
    where
        'a: 'j,
    {
        DecisionContext::new(self.now, self.config, self.world, jobs, self.nearby_waiting)
    }

    #[inline]
    fn autonomy(&self) -> AutonomyLevel {
        self.config.autonomy_level
    }

    /// Advance one courier by one tick.
    pub fn update(
        &self,
        courier:   &mut Courier,
        knowledge: &mut CourierKnowledge,
        rng:       &mut CourierRng,
        shared:    &mut Shared<'_>,
    ) {
        if let Some(strategy) = self.strategy {
            strategy.observe(courier, knowledge, &self.ctx(shared.jobs));
        }
        match courier.status {
            CourierStatus::Searching          => self.search(courier, knowledge, rng, shared),
            CourierStatus::Waiting            => self.wait(courier, knowledge, rng, shared),
            CourierStatus::MovingToRestaurant => self.move_to_restaurant(courier, knowledge, shared),
            CourierStatus::OnJob              => self.carry(courier, knowledge, shared),
        }
    }

    // ── Scanning states ───────────────────────────────────────────────────

    fn search(
        &self,
        courier:   &mut Courier,
        knowledge: &mut CourierKnowledge,
        rng:       &mut CourierRng,
        shared:    &mut Shared<'_>,
    ) {
        if self.check_neighbourhood(courier, rng, shared.jobs) {
            return;
        }
        if let Some((restaurant, why)) = self.rest_choice(courier, knowledge, shared.jobs, None) {
            self.relocate(courier, restaurant, why, shared.state);
            if courier.status == CourierStatus::MovingToRestaurant {
                return;
            }
        }
        wander(courier, rng, self.config.courier_speed, self.world);
    }

    fn wait(
        &self,
        courier:   &mut Courier,
        knowledge: &mut CourierKnowledge,
        rng:       &mut CourierRng,
        shared:    &mut Shared<'_>,
    ) {
        if self.check_neighbourhood(courier, rng, shared.jobs) {
            return;
        }
        let current = courier.target_restaurant.unwrap_or(courier.last_restaurant);
        if let Some((restaurant, why)) = self.rest_choice(courier, knowledge, shared.jobs, Some(current)) {
            self.relocate(courier, restaurant, why, shared.state);
            return;
        }
        if self.autonomy() >= AutonomyLevel::Medium && should_give_up_waiting(&knowledge.memory, self.config) {
            debug!(courier = %courier.id, tick = %self.now, "memory faded; searching");
            courier.start_searching();
            return;
        }
        // Walking back to the restaurant still counts as waiting.
        if let Some(target) = courier.next_destination {
            step_toward(courier, target, self.config.courier_speed, self.world);
            if has_arrived(courier, target) {
                courier.settle_at_rest();
            }
        }
    }

    /// Claim one available job in the neighbourhood, chosen uniformly from
    /// the courier's RNG.  Returns `true` if a job was taken.
    fn check_neighbourhood(&self, courier: &mut Courier, rng: &mut CourierRng, jobs: &mut JobRegistry) -> bool {
        let radius = self.config.neighbourhood_size;
        let candidates: Vec<JobId> = if self.autonomy() == AutonomyLevel::None {
            jobs.available_at(courier.last_restaurant)
                .filter(|j| courier.location.within(j.origin_location, radius))
                .map(|j| j.id)
                .collect()
        } else {
            jobs.available_within(self.world, courier.location, radius)
        };
        match rng.choose(&candidates) {
            Some(&id) => self.accept(courier, id, jobs),
            None => false,
        }
    }

    fn accept(&self, courier: &mut Courier, id: JobId, jobs: &mut JobRegistry) -> bool {
        if !jobs.try_claim(id) {
            return false;
        }
        let Some(job) = jobs.get(id) else { return false };
        let at_origin = courier.location.within(job.origin_location, ARRIVAL_TOLERANCE);
        courier.accept_job(id, job.origin_location, job.destination, at_origin, self.now);
        debug!(
            courier = %courier.id,
            job = %id,
            origin = %job.origin,
            reward = job.reward,
            at_origin,
            "job claimed"
        );
        true
    }

    // ── Relocation ────────────────────────────────────────────────────────

    /// Where an idle courier should rest, if anywhere other than `current`.
    /// The strategy is asked first; the memory policy covers the rest.
    fn rest_choice(
        &self,
        courier:   &Courier,
        knowledge: &CourierKnowledge,
        jobs:      &JobRegistry,
        current:   Option<RestaurantId>,
    ) -> Option<(RestaurantId, Relocation)> {
        if self.autonomy() < AutonomyLevel::Medium {
            return None;
        }
        if let Some(strategy) = self.strategy {
            if let Some((restaurant, why)) = strategy.choose_rest(courier, knowledge, &self.ctx(jobs)) {
                return (Some(restaurant) != current).then_some((restaurant, why));
            }
        }
        memory_rest_choice(&knowledge.memory, self.config, current).map(|r| (r, Relocation::Memory))
    }

    fn relocate(&self, courier: &mut Courier, restaurant: RestaurantId, why: Relocation, state: &mut SimState) {
        let Some(location) = self.resolve(courier, restaurant, state) else { return };
        debug!(courier = %courier.id, restaurant = %restaurant, ?why, "relocating");
        courier.head_to_rest(restaurant, location, Some(why));
    }

    /// Location of `restaurant`, or `None` after sending the courier back to
    /// searching.
    fn resolve(&self, courier: &mut Courier, restaurant: RestaurantId, state: &mut SimState) -> Option<Point> {
        let location = self.world.location_of(restaurant);
        if location.is_none() {
            warn!(courier = %courier.id, restaurant = %restaurant, "unknown restaurant; searching");
            state.lookup_misses += 1;
            courier.start_searching();
        }
        location
    }

    /// Drop any held job and fall back to searching.
    fn lookup_miss(&self, courier: &mut Courier, shared: &mut Shared<'_>, what: &str) {
        warn!(courier = %courier.id, tick = %self.now, status = %courier.status, "{what}; searching");
        if let Some(job) = courier.drop_job() {
            if let Err(e) = shared.jobs.release(job) {
                warn!(courier = %courier.id, error = %e, "could not release job");
            }
        }
        shared.state.lookup_misses += 1;
        courier.start_searching();
    }

    // ── Moving states ─────────────────────────────────────────────────────

    fn move_to_restaurant(&self, courier: &mut Courier, knowledge: &mut CourierKnowledge, shared: &mut Shared<'_>) {
        if let Some(strategy) = self.strategy {
            if let SwitchDecision::Take(id) = strategy.reevaluate(courier, knowledge, &self.ctx(shared.jobs)) {
                self.switch(courier, id, shared);
                if courier.status != CourierStatus::MovingToRestaurant {
                    return;
                }
            }
        }

        let Some(target) = courier.next_destination else {
            self.lookup_miss(courier, shared, "moving without a target");
            return;
        };
        step_toward(courier, target, self.config.courier_speed, self.world);
        if !has_arrived(courier, target) {
            return;
        }

        if !courier.to_origin {
            debug!(courier = %courier.id, restaurant = ?courier.target_restaurant, "reached rest restaurant");
            courier.settle_at_rest();
            return;
        }
        match courier.current_job.and_then(|id| shared.jobs.get(id)) {
            Some(job) => {
                debug!(courier = %courier.id, job = %job.id, "picked up");
                courier.begin_delivery(job.destination);
            }
            None => self.lookup_miss(courier, shared, "held job not in registry"),
        }
    }

    /// Abandon the current plan (and any held job) for `id`.
    fn switch(&self, courier: &mut Courier, id: JobId, shared: &mut Shared<'_>) {
        if courier.current_job == Some(id) || !shared.jobs.is_available(id) {
            return;
        }
        let previous = courier.drop_job();
        if let Some(old) = previous {
            if let Err(e) = shared.jobs.release(old) {
                warn!(courier = %courier.id, error = %e, "could not release job");
            }
        }
        if !self.accept(courier, id, shared.jobs) {
            self.lookup_miss(courier, shared, "switch target vanished");
            return;
        }
        courier.switches += 1;
        shared.state.switches += 1;
        debug!(courier = %courier.id, from = ?previous, to = %id, tick = %self.now, "switched job");
    }

    fn carry(&self, courier: &mut Courier, knowledge: &mut CourierKnowledge, shared: &mut Shared<'_>) {
        let Some(target) = courier.next_destination else {
            self.lookup_miss(courier, shared, "carrying without a destination");
            return;
        };
        step_toward(courier, target, self.config.courier_speed, self.world);
        if has_arrived(courier, target) {
            self.deliver(courier, knowledge, shared);
        }
    }

    // ── Settlement ────────────────────────────────────────────────────────

    fn deliver(&self, courier: &mut Courier, knowledge: &mut CourierKnowledge, shared: &mut Shared<'_>) {
        let kind = courier.job_kind;
        let Some(id) = courier.drop_job() else {
            self.lookup_miss(courier, shared, "arrived without a job");
            return;
        };
        let job = match shared.jobs.complete(id) {
            Ok(job) => job,
            Err(e) => {
                warn!(courier = %courier.id, error = %e, "delivery of unknown job");
                shared.state.lookup_misses += 1;
                courier.start_searching();
                return;
            }
        };

        courier.credit(job.reward);
        if self.config.use_memory {
            knowledge.memory.record(job.origin, job.reward);
            knowledge.memory.find_best_restaurant();
        }
        if let Some(strategy) = self.strategy {
            strategy.on_delivery(job.origin, job.reward, knowledge, &self.ctx(shared.jobs));
        }
        courier.last_restaurant = job.origin;

        let event = DeliveryEvent {
            tick: self.now,
            courier: courier.id,
            job: id,
            origin: job.origin,
            reward: job.reward,
            kind,
            delivery_time: self.now.since(job.created),
        };
        debug!(courier = %courier.id, job = %id, reward = job.reward, ?kind, "delivered");
        shared.state.record_delivery(&event);
        shared.events.push(event);

        self.after_delivery(courier, knowledge, shared);
    }

    fn after_delivery(&self, courier: &mut Courier, knowledge: &CourierKnowledge, shared: &mut Shared<'_>) {
        if self.autonomy() < AutonomyLevel::Medium {
            let home = courier.last_restaurant;
            if let Some(location) = self.resolve(courier, home, shared.state) {
                courier.return_to(home, location);
            }
            return;
        }
        match self.rest_choice(courier, knowledge, shared.jobs, None) {
            Some((restaurant, why)) => {
                self.relocate(courier, restaurant, why, shared.state);
                if courier.status == CourierStatus::MovingToRestaurant {
                    courier.must_reach_rest = self.config.first_go_back_to_rest;
                }
            }
            None => courier.start_searching(),
        }
    }
}
