//! The courier record.

use std::fmt;

use ct_core::{CourierId, JobId, Point, RestaurantId, Tick};

// ── CourierStatus ─────────────────────────────────────────────────────────────

/// What a courier is doing this tick.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CourierStatus {
    /// Wandering and scanning for jobs.
    Searching,
    /// At a restaurant, or walking back to one, and scanning for jobs.
    #[default]
    Waiting,
    /// Heading to a pickup or to a chosen rest restaurant.
    MovingToRestaurant,
    /// Carrying a job to its destination.
    OnJob,
}

impl CourierStatus {
    pub const COUNT: usize = 4;

    pub const ALL: [CourierStatus; Self::COUNT] = [
        CourierStatus::Searching,
        CourierStatus::Waiting,
        CourierStatus::MovingToRestaurant,
        CourierStatus::OnJob,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CourierStatus::Searching          => "searching",
            CourierStatus::Waiting            => "waiting",
            CourierStatus::MovingToRestaurant => "moving-to-restaurant",
            CourierStatus::OnJob              => "on-job",
        }
    }

    /// Display colour.  A projection of the status only.
    pub fn color(self) -> &'static str {
        match self {
            CourierStatus::Searching          => "blue",
            CourierStatus::Waiting            => "yellow",
            CourierStatus::MovingToRestaurant => "orange",
            CourierStatus::OnJob              => "green",
        }
    }

    /// `true` in the two scanning states.
    #[inline]
    pub fn is_scanning(self) -> bool {
        matches!(self, CourierStatus::Searching | CourierStatus::Waiting)
    }
}

impl fmt::Display for CourierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── JobKind / Relocation ──────────────────────────────────────────────────────

/// How a held job was found.  Counted at delivery.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobKind {
    #[default]
    OnTheFly,
    /// Accepted while relocated by memory or prediction.
    Memory,
}

/// Why the courier is heading to its current rest restaurant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relocation {
    Memory,
    Prediction,
}

// ── Courier ───────────────────────────────────────────────────────────────────

/// One courier.  Mutated only by the simulation engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Courier {
    pub id: CourierId,
    pub location: Point,
    /// Radians, 0 = +x.
    pub heading: f64,
    pub status: CourierStatus,

    // ── Job ───────────────────────────────────────────────────────────────
    pub current_job: Option<JobId>,
    pub job_kind: JobKind,
    /// Tick the held job was accepted.
    pub job_accepted: Tick,

    // ── Navigation ────────────────────────────────────────────────────────
    pub next_destination: Option<Point>,
    /// Rest or return restaurant behind `next_destination`, if any.
    pub target_restaurant: Option<RestaurantId>,
    pub to_origin: bool,
    pub to_destination: bool,
    /// Set while relocated by memory or prediction; classifies the next job.
    pub relocation: Option<Relocation>,
    /// Re-evaluation is suppressed until the rest restaurant is reached.
    pub must_reach_rest: bool,

    // ── History ───────────────────────────────────────────────────────────
    /// Monotonic.
    pub total_reward: f64,
    pub has_completed_first_job: bool,
    pub last_restaurant: RestaurantId,
    pub deliveries: u32,
    pub switches: u32,

    // ── Earnings rate ─────────────────────────────────────────────────────
    /// Reward earned in the open window.
    pub window_reward: f64,
    /// Reward earned in the last completed window.
    pub earnings_rate: f64,
}

impl Courier {
    /// A courier waiting at `restaurant`.
    pub fn new(id: CourierId, restaurant: RestaurantId, location: Point) -> Self {
        Self {
            id,
            location,
            heading: 0.0,
            status: CourierStatus::Waiting,
            current_job: None,
            job_kind: JobKind::OnTheFly,
            job_accepted: Tick::ZERO,
            next_destination: None,
            target_restaurant: None,
            to_origin: false,
            to_destination: false,
            relocation: None,
            must_reach_rest: false,
            total_reward: 0.0,
            has_completed_first_job: false,
            last_restaurant: restaurant,
            deliveries: 0,
            switches: 0,
            window_reward: 0.0,
            earnings_rate: 0.0,
        }
    }

    #[inline]
    pub fn holds_job(&self) -> bool {
        self.current_job.is_some()
    }

    /// Credit a delivery.  Negative amounts are ignored so the total never
    /// decreases.
    pub fn credit(&mut self, reward: f64) {
        let reward = reward.max(0.0);
        self.total_reward += reward;
        self.window_reward += reward;
        self.deliveries += 1;
        self.has_completed_first_job = true;
    }

    /// Close the earnings window.
    pub fn roll_earnings_window(&mut self) {
        self.earnings_rate = self.window_reward;
        self.window_reward = 0.0;
    }

    /// Drop every navigation target.
    pub fn clear_navigation(&mut self) {
        self.next_destination = None;
        self.target_restaurant = None;
        self.to_origin = false;
        self.to_destination = false;
        self.must_reach_rest = false;
    }

    /// Start wandering.
    pub fn start_searching(&mut self) {
        self.clear_navigation();
        self.relocation = None;
        self.status = CourierStatus::Searching;
    }

    /// Head for a rest restaurant at `location`.
    pub fn head_to_rest(&mut self, restaurant: RestaurantId, location: Point, why: Option<Relocation>) {
        self.clear_navigation();
        self.next_destination = Some(location);
        self.target_restaurant = Some(restaurant);
        self.relocation = why;
        self.status = CourierStatus::MovingToRestaurant;
    }

    /// Walk back to `restaurant` while scanning.
    pub fn return_to(&mut self, restaurant: RestaurantId, location: Point) {
        self.clear_navigation();
        self.next_destination = Some(location);
        self.target_restaurant = Some(restaurant);
        self.relocation = None;
        self.status = CourierStatus::Waiting;
    }

    /// Reached the rest or return restaurant: wait there.  `relocation` is
    /// kept so the next job is still classified by how the courier got here.
    pub fn settle_at_rest(&mut self) {
        self.next_destination = None;
        self.must_reach_rest = false;
        self.status = CourierStatus::Waiting;
    }

    /// Take `job`: straight to the destination when already at the pickup,
    /// otherwise to the pickup first.
    pub fn accept_job(&mut self, job: JobId, origin: Point, destination: Point, at_origin: bool, now: Tick) {
        self.job_kind = if self.relocation.is_some() { JobKind::Memory } else { JobKind::OnTheFly };
        self.current_job = Some(job);
        self.job_accepted = now;
        self.target_restaurant = None;
        self.must_reach_rest = false;
        if at_origin {
            self.begin_delivery(destination);
        } else {
            self.next_destination = Some(origin);
            self.to_origin = true;
            self.to_destination = false;
            self.status = CourierStatus::MovingToRestaurant;
        }
    }

    /// Picked up: carry the job to `destination`.
    pub fn begin_delivery(&mut self, destination: Point) {
        self.next_destination = Some(destination);
        self.to_origin = false;
        self.to_destination = true;
        self.status = CourierStatus::OnJob;
    }

    /// Forget the held job; returns it.
    pub fn drop_job(&mut self) -> Option<JobId> {
        self.to_origin = false;
        self.to_destination = false;
        self.current_job.take()
    }
}
