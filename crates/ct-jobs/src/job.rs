//! A single delivery task.

use ct_core::{JobId, Point, RestaurantId, Tick};

/// Pick up at `origin`, drop off at `destination`.
///
/// `reward` is the straight-line pickup→drop-off distance and never changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub id: JobId,
    pub created: Tick,
    pub origin: RestaurantId,
    /// Copied from the world at creation so couriers can steer without a
    /// restaurant lookup.
    pub origin_location: Point,
    pub destination: Point,
    pub reward: f64,
    pub available: bool,
}

impl Job {
    /// Straight-line length of the delivery leg.
    #[inline]
    pub fn trip_length(&self) -> f64 {
        self.origin_location.distance(self.destination)
    }

    /// Ticks since the job was posted.
    #[inline]
    pub fn age(&self, now: Tick) -> u64 {
        now.since(self.created)
    }
}
