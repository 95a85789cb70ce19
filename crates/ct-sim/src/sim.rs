//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use ct_behavior::DecisionStrategy;
use ct_core::{CourierId, JobId, Point, RestaurantId, SimClock, SimConfig, SimRng, Tick};
use ct_courier::{CourierRngs, CourierStore};
use ct_jobs::{ArrivalProcess, JobRegistry, RestaurantView};
use ct_world::World;

use crate::engine::{Engine, Shared};
use crate::metrics::mean;
use crate::{DeliveryEvent, NoopObserver, RunSummary, SimMetrics, SimObserver, SimResult, SimState};

/// Memory fade period in ticks.
pub const FADE_PERIOD: u64 = 60;

/// Restaurant backlog refresh period in ticks.
pub const VIEW_REFRESH_PERIOD: u64 = 10;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs, in order:
///
/// 1. **Maintenance**: memory fade every [`FADE_PERIOD`] ticks, backlog view
///    refresh every [`VIEW_REFRESH_PERIOD`], prediction-accuracy aggregation
///    every `debug_interval`, earnings-window roll every
///    `earnings_interval_ticks`.
/// 2. **Competition snapshot**: waiting couriers near each restaurant.
/// 3. **Courier pass**: every courier is updated once, in a fresh seeded
///    permutation.  Job claims are check-then-set, so the courier visited
///    first wins a contested job.
/// 4. **Arrivals**: one Bernoulli trial for a new job.
/// 5. The clock advances.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,
    pub clock: SimClock,
    pub world: World,
    pub jobs: JobRegistry,
    /// Per-restaurant backlog, refreshed every [`VIEW_REFRESH_PERIOD`] ticks.
    pub view: RestaurantView,
    pub store: CourierStore,
    /// Per-courier RNGs, separated for the split-borrow pattern.
    pub rngs: CourierRngs,
    pub arrivals: ArrivalProcess,
    /// Consulted only at the highest autonomy level.
    pub strategy: Option<Box<dyn DecisionStrategy>>,
    pub state: SimState,

    pub(crate) order_rng: SimRng,
    pub(crate) arrival_rng: SimRng,
    pub(crate) order: Vec<CourierId>,
    pub(crate) nearby_waiting: Vec<usize>,
    pub(crate) events: Vec<DeliveryEvent>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    ///
    /// Use [`NoopObserver`] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            label = %self.config.label(),
            couriers = self.store.len(),
            restaurants = self.world.restaurant_count(),
            ticks = self.config.total_ticks,
            "simulation start"
        );
        while self.clock.current_tick.0 < self.config.total_ticks {
            self.tick_with(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            tick = %self.clock.current_tick,
            deliveries = self.state.deliveries,
            switches = self.state.switches,
            "simulation end"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_with(observer);
        }
        Ok(())
    }

    /// Run a single tick without callbacks.
    pub fn step(&mut self) {
        self.tick_with(&mut NoopObserver);
    }

    /// Snapshot of the exposed read-only metrics.
    pub fn metrics(&self) -> SimMetrics {
        SimMetrics::collect(self.clock.current_tick, &self.store, &self.state, self.jobs.available_count())
    }

    /// End-of-run figures for the ticks simulated so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary::collect(&self.config, self.clock.current_tick, &self.store, &self.state)
    }

    /// Post a job at `origin` now, outside the arrival process.
    pub fn post_job(&mut self, origin: RestaurantId, destination: Point) -> SimResult<JobId> {
        let location = self.world.try_location_of(origin)?;
        Ok(self.jobs.insert(origin, location, destination, self.clock.current_tick))
    }

    /// Check the claim and status invariants.  Violations are logged,
    /// appended to `state.violations` and returned; the run is never halted.
    pub fn audit(&mut self) -> Vec<String> {
        let mut found = Vec::new();

        let counted: usize = self.store.status_counts().iter().sum();
        if counted != self.store.len() {
            found.push(format!("status counts sum to {counted}, population is {}", self.store.len()));
        }

        let mut holders: BTreeMap<JobId, CourierId> = BTreeMap::new();
        for c in &self.store.couriers {
            let Some(id) = c.current_job else { continue };
            if let Some(other) = holders.insert(id, c.id) {
                found.push(format!("job {id} held by couriers {other} and {}", c.id));
            }
            match self.jobs.get(id) {
                None => found.push(format!("courier {} holds unknown job {id}", c.id)),
                Some(job) if job.available => {
                    found.push(format!("job {id} is available but held by courier {}", c.id))
                }
                Some(_) => {}
            }
        }
        for job in self.jobs.iter().filter(|j| !j.available) {
            if !holders.contains_key(&job.id) {
                found.push(format!("job {} is claimed but held by no courier", job.id));
            }
        }

        for v in &found {
            warn!(tick = %self.clock.current_tick, violation = %v, "invariant violated");
        }
        self.state.violations.extend(found.iter().cloned());
        found
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_with<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now);
        for event in self.events.drain(..) {
            observer.on_delivery(&event);
        }
        if observer.wants_metrics(now) {
            observer.on_tick_end(now, &self.metrics());
        }
        self.clock.advance();
    }

    fn process_tick(&mut self, now: Tick) {
        self.maintenance(now);
        self.count_nearby_waiting();

        self.order.clear();
        self.order.extend(self.store.ids());
        self.order_rng.shuffle(&mut self.order);

        let engine = Engine {
            now,
            config: &self.config,
            world: &self.world,
            strategy: self.strategy.as_deref(),
            nearby_waiting: &self.nearby_waiting,
        };
        let mut shared = Shared {
            jobs: &mut self.jobs,
            state: &mut self.state,
            events: &mut self.events,
        };
        for &id in &self.order {
            let Some((courier, knowledge)) = self.store.split_mut(id) else { continue };
            let rng = self.rngs.get_mut(id);
            engine.update(courier, knowledge, rng, &mut shared);
        }

        self.state.observe(&self.store);
        self.arrivals.tick(&mut self.jobs, &self.world, now, &mut self.arrival_rng);

        if self.config.debug && now.every(self.config.debug_interval) {
            self.audit();
        }
    }

    fn maintenance(&mut self, now: Tick) {
        if self.config.use_memory && now.every(FADE_PERIOD) {
            let (strategy, rate) = (self.config.fade_strategy, self.config.fade_rate());
            for k in &mut self.store.knowledge {
                k.memory.fade(strategy, rate);
                k.memory.find_best_restaurant();
            }
            trace!(tick = %now, %strategy, rate, "memory faded");
        }
        if now.every(VIEW_REFRESH_PERIOD) {
            self.view.refresh(&self.world, &self.jobs);
            trace!(tick = %now, backlog = self.view.total(), "restaurant view refreshed");
        }
        if now.every(self.config.debug_interval) {
            self.aggregate_accuracy(now);
        }
        if now.0 > 0 && now.every(self.config.earnings_interval_ticks) {
            for c in &mut self.store.couriers {
                c.roll_earnings_window();
            }
        }
    }

    fn aggregate_accuracy(&mut self, now: Tick) {
        let scored: Vec<f64> = self
            .store
            .knowledge
            .iter()
            .filter_map(|k| k.predictor.accuracy())
            .collect();
        self.state.prediction_accuracy = (!scored.is_empty()).then(|| mean(&scored));
        if self.config.debug {
            let weights: Vec<f64> = self.store.knowledge.iter().map(|k| k.predictor.weight()).collect();
            debug!(
                tick = %now,
                block = %now.time_block(),
                accuracy = ?self.state.prediction_accuracy,
                scored = scored.len(),
                mean_weight = mean(&weights),
                "prediction accuracy"
            );
        }
    }

    fn count_nearby_waiting(&mut self) {
        let radius = self.config.neighbourhood_size;
        self.nearby_waiting.clear();
        self.nearby_waiting.extend(
            self.world
                .restaurants
                .iter()
                .map(|r| self.store.waiting_within(r.location, radius)),
        );
    }
}
