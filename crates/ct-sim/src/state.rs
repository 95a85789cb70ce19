//! Run-wide counters owned by the simulation.

use ct_core::{CourierId, JobId, RestaurantId, Tick};
use ct_courier::{CourierStatus, CourierStore, JobKind};

/// One settled delivery, as reported to observers.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryEvent {
    pub tick: Tick,
    pub courier: CourierId,
    pub job: JobId,
    pub origin: RestaurantId,
    pub reward: f64,
    pub kind: JobKind,
    /// Ticks from posting to delivery.
    pub delivery_time: u64,
}

/// Counters accumulated over the whole run.
///
/// Status ticks are courier-ticks: every courier adds one to the bucket of
/// its status at the end of every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimState {
    pub on_the_fly_jobs: u64,
    pub memory_jobs: u64,
    pub switches: u64,
    pub deliveries: u64,
    pub delivery_times: Vec<u64>,

    pub status_ticks: [u64; CourierStatus::COUNT],
    /// Courier-ticks spent holding a job.
    pub holding_ticks: u64,

    /// Mean prediction accuracy over couriers at the last aggregation, or
    /// `None` while no courier has a scored prediction.
    pub prediction_accuracy: Option<f64>,

    /// Unresolvable targets that sent a courier back to searching.
    pub lookup_misses: u64,
    /// Invariant violations found by [`Sim::audit`](crate::Sim::audit).
    pub violations: Vec<String>,
}

impl SimState {
    pub fn record_delivery(&mut self, event: &DeliveryEvent) {
        self.deliveries += 1;
        self.delivery_times.push(event.delivery_time);
        match event.kind {
            JobKind::OnTheFly => self.on_the_fly_jobs += 1,
            JobKind::Memory   => self.memory_jobs += 1,
        }
    }

    /// Add one courier-tick per courier to the status buckets.
    pub fn observe(&mut self, store: &CourierStore) {
        for c in &store.couriers {
            self.status_ticks[c.status.index()] += 1;
            if c.holds_job() {
                self.holding_ticks += 1;
            }
        }
    }

    #[inline]
    pub fn courier_ticks(&self) -> u64 {
        self.status_ticks.iter().sum()
    }

    /// Share of courier-ticks spent in `status`, in percent.
    pub fn status_percentage(&self, status: CourierStatus) -> f64 {
        match self.courier_ticks() {
            0 => 0.0,
            total => 100.0 * self.status_ticks[status.index()] as f64 / total as f64,
        }
    }

    /// Memory jobs per on-the-fly job; `None` before any on-the-fly delivery.
    pub fn job_type_ratio(&self) -> Option<f64> {
        (self.on_the_fly_jobs > 0).then(|| self.memory_jobs as f64 / self.on_the_fly_jobs as f64)
    }
}
