//! `JobRegistry`: every open job in the simulation.
//!
//! Jobs live in a `BTreeMap` keyed by `JobId` so every scan visits them in
//! posting order, which keeps runs reproducible for a given seed.  A
//! per-restaurant index answers the "jobs waiting at this restaurant" query
//! without a full scan.

use std::collections::BTreeMap;

use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::trace;

use ct_core::{JobId, Point, RestaurantId, Tick};
use ct_world::{World, WorldError};

use crate::{Job, JobError, JobResult};

#[derive(Default)]
pub struct JobRegistry {
    jobs: BTreeMap<JobId, Job>,
    by_restaurant: FxHashMap<RestaurantId, Vec<JobId>>,
    next_id: u64,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Post a job at a random restaurant with a random drop-off point.
    pub fn create_job<R: Rng + ?Sized>(&mut self, world: &World, now: Tick, rng: &mut R) -> JobResult<JobId> {
        let origin = world.random_restaurant(rng).ok_or(WorldError::Empty)?;
        let origin_location = world.try_location_of(origin)?;
        let destination = world.random_point(rng);
        Ok(self.insert(origin, origin_location, destination, now))
    }

    /// Post a job with explicit endpoints.  The reward is their distance.
    pub fn insert(&mut self, origin: RestaurantId, origin_location: Point, destination: Point, now: Tick) -> JobId {
        let id = JobId(self.next_id);
        self.next_id += 1;
        let reward = origin_location.distance(destination);
        self.jobs.insert(id, Job {
            id,
            created: now,
            origin,
            origin_location,
            destination,
            reward,
            available: true,
        });
        self.by_restaurant.entry(origin).or_default().push(id);
        trace!(job = %id, restaurant = %origin, reward, "job posted");
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(&id)
    }

    #[inline]
    pub fn is_available(&self, id: JobId) -> bool {
        self.jobs.get(&id).is_some_and(|j| j.available)
    }

    /// Total open jobs, held or not.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.jobs.values().filter(|j| j.available).count()
    }

    /// Number of jobs ever posted.
    pub fn posted(&self) -> u64 {
        self.next_id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.values()
    }

    /// Available jobs posted at `restaurant`, oldest first.
    pub fn available_at(&self, restaurant: RestaurantId) -> impl Iterator<Item = &Job> + '_ {
        self.by_restaurant
            .get(&restaurant)
            .into_iter()
            .flatten()
            .filter_map(|id| self.jobs.get(id))
            .filter(|j| j.available)
    }

    /// Waiting (available) jobs at `restaurant`.
    pub fn backlog(&self, restaurant: RestaurantId) -> usize {
        self.available_at(restaurant).count()
    }

    /// Available jobs whose origin restaurant lies within `radius` of `pos`.
    /// Ordered by restaurant id, then posting order.
    pub fn available_within(&self, world: &World, pos: Point, radius: f64) -> Vec<JobId> {
        world
            .restaurants_within(pos, radius)
            .into_iter()
            .flat_map(|r| self.available_at(r).map(|j| j.id))
            .collect()
    }

    /// Highest-reward available job within `radius` of `pos`.  Ties go to the
    /// oldest job.
    pub fn best_available_within(&self, world: &World, pos: Point, radius: f64) -> Option<&Job> {
        let mut best: Option<&Job> = None;
        for id in self.available_within(world, pos, radius) {
            let Some(job) = self.jobs.get(&id) else { continue };
            best = match best {
                Some(b) if b.reward > job.reward || (b.reward == job.reward && b.id < job.id) => Some(b),
                _ => Some(job),
            };
        }
        best
    }

    // ── Claim lifecycle ───────────────────────────────────────────────────

    /// Check-then-set: mark `id` unavailable if it is available.  Returns
    /// whether this call took it.
    pub fn try_claim(&mut self, id: JobId) -> bool {
        match self.jobs.get_mut(&id) {
            Some(job) if job.available => {
                job.available = false;
                true
            }
            _ => false,
        }
    }

    /// Like [`try_claim`](Self::try_claim) but says why it failed.
    pub fn claim(&mut self, id: JobId) -> JobResult<&Job> {
        let job = self.jobs.get_mut(&id).ok_or(JobError::NotFound(id))?;
        if !job.available {
            return Err(JobError::AlreadyClaimed(id));
        }
        job.available = false;
        Ok(job)
    }

    /// Put a held job back on offer.
    pub fn release(&mut self, id: JobId) -> JobResult<()> {
        let job = self.jobs.get_mut(&id).ok_or(JobError::NotFound(id))?;
        if job.available {
            return Err(JobError::NotClaimed(id));
        }
        job.available = true;
        trace!(job = %id, "job released");
        Ok(())
    }

    /// Remove a delivered job and return it.
    pub fn complete(&mut self, id: JobId) -> JobResult<Job> {
        let job = self.jobs.remove(&id).ok_or(JobError::NotFound(id))?;
        if let Some(ids) = self.by_restaurant.get_mut(&job.origin) {
            ids.retain(|&j| j != id);
        }
        Ok(job)
    }
}
