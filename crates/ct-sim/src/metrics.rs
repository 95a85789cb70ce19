//! Read-only views of a running or finished simulation.
//!
//! - [`SimMetrics`]: per-tick snapshot handed to observers (display,
//!   progress output).
//! - [`RunSummary`]: per-run figures in the column layout the experiment
//!   analysis reads.

use ct_core::{SimConfig, Tick, TimeBlock};
use ct_courier::{CourierStatus, CourierStore};

use crate::SimState;

/// Added to the deliveries-per-courier SD so a perfectly balanced run does
/// not divide by zero.
pub const BALANCE_EPSILON: f64 = 0.1;

const TICKS_PER_HOUR: f64 = 3_600.0;

// ── SimMetrics ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimMetrics {
    pub tick: Tick,
    pub block: TimeBlock,
    /// Indexed by [`CourierStatus::index`].
    pub status_counts: [usize; CourierStatus::COUNT],
    /// Indexed by `CourierId`.
    pub total_rewards: Vec<f64>,
    /// Reward earned in each courier's last completed earnings window.
    pub earnings_rates: Vec<f64>,
    pub on_the_fly_jobs: u64,
    pub memory_jobs: u64,
    pub prediction_accuracy: Option<f64>,
    pub prediction_weights: Vec<f64>,
    pub open_jobs: usize,
}

impl SimMetrics {
    pub fn collect(tick: Tick, store: &CourierStore, state: &SimState, open_jobs: usize) -> Self {
        Self {
            tick,
            block: tick.time_block(),
            status_counts: store.status_counts(),
            total_rewards: store.couriers.iter().map(|c| c.total_reward).collect(),
            earnings_rates: store.couriers.iter().map(|c| c.earnings_rate).collect(),
            on_the_fly_jobs: state.on_the_fly_jobs,
            memory_jobs: state.memory_jobs,
            prediction_accuracy: state.prediction_accuracy,
            prediction_weights: store.knowledge.iter().map(|k| k.predictor.weight()).collect(),
            open_jobs,
        }
    }

    #[inline]
    pub fn count(&self, status: CourierStatus) -> usize {
        self.status_counts[status.index()]
    }

    pub fn average_prediction_weight(&self) -> f64 {
        mean(&self.prediction_weights)
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// End-of-run figures.  Field names serialize to the analysis columns
/// (`TotalDeliveries`, `AvgDeliveryTime`, ...).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct RunSummary {
    pub label: String,
    pub ticks: u64,
    pub total_deliveries: u64,
    pub avg_delivery_time: f64,
    #[cfg_attr(feature = "serde", serde(rename = "DeliveryTimeSD"))]
    pub delivery_time_sd: f64,
    pub avg_earnings: f64,
    #[cfg_attr(feature = "serde", serde(rename = "EarningsSD"))]
    pub earnings_sd: f64,
    pub avg_deliveries_per_courier: f64,
    #[cfg_attr(feature = "serde", serde(rename = "DeliveriesPerCourierSD"))]
    pub deliveries_per_courier_sd: f64,
    /// Fraction of courier-ticks spent holding a job.
    pub courier_utilization: f64,
    pub waiting_percentage: f64,
    pub searching_percentage: f64,
    /// Mean per-courier reward per simulated hour.
    pub earnings_per_hour: f64,
    pub on_the_fly_jobs: u64,
    pub memory_jobs: u64,
    pub job_type_ratio: Option<f64>,
    pub efficiency_to_balance_ratio: f64,
    pub job_switches: u64,
}

impl RunSummary {
    pub fn collect(config: &SimConfig, elapsed: Tick, store: &CourierStore, state: &SimState) -> Self {
        let times: Vec<f64> = state.delivery_times.iter().map(|&t| t as f64).collect();
        let earnings: Vec<f64> = store.couriers.iter().map(|c| c.total_reward).collect();
        let per_courier: Vec<f64> = store.couriers.iter().map(|c| c.deliveries as f64).collect();

        let avg_earnings = mean(&earnings);
        let hours = elapsed.0 as f64 / TICKS_PER_HOUR;
        let deliveries_per_courier_sd = std_dev(&per_courier);
        let courier_ticks = state.courier_ticks();

        Self {
            label: config.label(),
            ticks: elapsed.0,
            total_deliveries: state.deliveries,
            avg_delivery_time: mean(&times),
            delivery_time_sd: std_dev(&times),
            avg_earnings,
            earnings_sd: std_dev(&earnings),
            avg_deliveries_per_courier: mean(&per_courier),
            deliveries_per_courier_sd,
            courier_utilization: if courier_ticks == 0 {
                0.0
            } else {
                state.holding_ticks as f64 / courier_ticks as f64
            },
            waiting_percentage: state.status_percentage(CourierStatus::Waiting),
            searching_percentage: state.status_percentage(CourierStatus::Searching),
            earnings_per_hour: if hours > 0.0 { avg_earnings / hours } else { 0.0 },
            on_the_fly_jobs: state.on_the_fly_jobs,
            memory_jobs: state.memory_jobs,
            job_type_ratio: state.job_type_ratio(),
            efficiency_to_balance_ratio: state.deliveries as f64
                / (deliveries_per_courier_sd + BALANCE_EPSILON),
            job_switches: state.switches,
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; `0.0` for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
