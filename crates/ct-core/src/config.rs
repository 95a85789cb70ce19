//! Run configuration.
//!
//! Every knob the display collaborator exposes (sliders, choosers, switches)
//! is a scalar or enum field here.  There is no file format in the core; the
//! `serde` feature lets an application load a `SimConfig` from JSON/TOML and
//! fill missing fields from [`SimConfig::default`].

use std::fmt;

use crate::{CoreError, CoreResult, TICKS_PER_DAY};

// ── Enums ─────────────────────────────────────────────────────────────────────

/// How independently a courier chooses where to go.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutonomyLevel {
    /// Level 0: only takes jobs at its own restaurant, always returns there.
    None,
    /// Level 1: scans the neighbourhood but still returns to its last restaurant.
    Low,
    /// Level 2: uses reward memory to relocate or give up waiting.
    Medium,
    /// Level 3: predictive heat map and route re-evaluation.
    #[default]
    High,
}

impl AutonomyLevel {
    /// Numeric level as shown on the GUI slider (0–3).
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Parse a GUI slider value.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(AutonomyLevel::None),
            1 => Some(AutonomyLevel::Low),
            2 => Some(AutonomyLevel::Medium),
            3 => Some(AutonomyLevel::High),
            _ => None,
        }
    }
}

/// Degree of information sharing between couriers (1–3).
///
/// Carried through to the decision context; the built-in strategies do not
/// branch on it.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cooperativeness {
    #[default]
    Low,
    Medium,
    High,
}

impl Cooperativeness {
    pub fn level(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Cooperativeness::Low),
            2 => Some(Cooperativeness::Medium),
            3 => Some(Cooperativeness::High),
            _ => None,
        }
    }
}

/// Globally selected decay model applied to every courier's reward memory.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FadeStrategy {
    None,
    /// Uniform erosion: `v *= 1 − rate`.
    #[default]
    Linear,
    /// Older entries fade super-linearly: `v *= (1 − rate)^(1 + 2·pos)`.
    Exponential,
    /// Softmax-style position weights; recent entries barely decay.
    RecencyWeighted,
}

impl FadeStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            FadeStrategy::None            => "None",
            FadeStrategy::Linear          => "Linear",
            FadeStrategy::Exponential     => "Exponential",
            FadeStrategy::RecencyWeighted => "Recency-weighted",
        }
    }
}

impl fmt::Display for FadeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision strategy used at the highest autonomy tier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LearningModel {
    #[default]
    DemandPrediction,
    /// Extension point; behaves like autonomy level 2.
    LearningAndAdaptation,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Ticks to simulate in batch mode.  86 400 = one day.
    pub total_ticks: u64,

    pub autonomy_level: AutonomyLevel,
    pub cooperativeness_level: Cooperativeness,
    pub courier_population: usize,

    /// Percent chance (0–100) that one job arrives on a given tick.
    pub job_arrival_rate: f64,

    /// Radius within which a courier sees jobs and competing couriers.
    pub neighbourhood_size: f64,

    pub use_memory: bool,

    /// Percent (0–20) removed from memory per fade period.
    pub memory_fade: f64,
    pub fade_strategy: FadeStrategy,

    /// Capacity of each per-restaurant reward list.
    pub level_of_order: usize,

    /// Minimum heat-map score / summed memory that justifies relocating.
    pub free_moving_threshold: f64,

    pub learning_model: LearningModel,

    /// EMA factor (0.1–1) for the time-pattern table.
    pub learning_rate: f64,

    /// Percent (10–100) a candidate job must beat the reference reward by.
    pub switch_threshold: f64,
    pub opportunistic_switch: bool,
    pub first_go_back_to_rest: bool,

    /// Initial weight (0–1) of the historical component of a prediction.
    pub start_prediction_weight: f64,

    // ── Geometry (owned by the world collaborator) ────────────────────────
    pub restaurant_clusters: usize,
    pub restaurants_per_cluster: usize,
    pub cluster_area_size: f64,
    /// The world spans `[-world_half_extent, world_half_extent]²`.
    pub world_half_extent: f64,

    /// Distance covered per tick.
    pub courier_speed: f64,

    /// Window for the per-courier earnings-rate metric.
    pub earnings_interval_ticks: u64,

    // ── Diagnostics ───────────────────────────────────────────────────────
    pub debug: bool,
    /// Prediction-accuracy aggregation period.
    pub debug_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            total_ticks:             TICKS_PER_DAY,
            autonomy_level:          AutonomyLevel::High,
            cooperativeness_level:   Cooperativeness::Low,
            courier_population:      20,
            job_arrival_rate:        10.0,
            neighbourhood_size:      10.0,
            use_memory:              true,
            memory_fade:             5.0,
            fade_strategy:           FadeStrategy::Linear,
            level_of_order:          5,
            free_moving_threshold:   10.0,
            learning_model:          LearningModel::DemandPrediction,
            learning_rate:           0.3,
            switch_threshold:        30.0,
            opportunistic_switch:    false,
            first_go_back_to_rest:   false,
            start_prediction_weight: 0.5,
            restaurant_clusters:     3,
            restaurants_per_cluster: 4,
            cluster_area_size:       5.0,
            world_half_extent:       50.0,
            courier_speed:           1.0,
            earnings_interval_ticks: 3_600,
            debug:                   false,
            debug_interval:          600,
        }
    }
}

impl SimConfig {
    /// Reject values outside the ranges the GUI sliders allow.
    pub fn validate(&self) -> CoreResult<()> {
        fn check(ok: bool, msg: impl FnOnce() -> String) -> CoreResult<()> {
            if ok { Ok(()) } else { Err(CoreError::Config(msg())) }
        }

        check(self.courier_population > 0, || "courier_population must be > 0".into())?;
        let restaurants = self.restaurant_clusters.checked_mul(self.restaurants_per_cluster);
        check(restaurants.is_some_and(|n| n > 0), || {
            format!(
                "restaurant_clusters × restaurants_per_cluster must be > 0 and fit in usize (got {} × {})",
                self.restaurant_clusters, self.restaurants_per_cluster
            )
        })?;
        check((0.0..=100.0).contains(&self.job_arrival_rate), || {
            format!("job_arrival_rate {} outside 0–100", self.job_arrival_rate)
        })?;
        check((0.0..=20.0).contains(&self.memory_fade), || {
            format!("memory_fade {} outside 0–20", self.memory_fade)
        })?;
        check((0.1..=1.0).contains(&self.learning_rate), || {
            format!("learning_rate {} outside 0.1–1", self.learning_rate)
        })?;
        check((10.0..=100.0).contains(&self.switch_threshold), || {
            format!("switch_threshold {} outside 10–100", self.switch_threshold)
        })?;
        check((0.0..=1.0).contains(&self.start_prediction_weight), || {
            format!("start_prediction_weight {} outside 0–1", self.start_prediction_weight)
        })?;
        check(self.level_of_order > 0, || "level_of_order must be > 0".into())?;
        check(self.neighbourhood_size >= 0.0, || "neighbourhood_size must be ≥ 0".into())?;
        check(self.courier_speed.is_finite() && self.courier_speed > 0.0, || {
            format!("courier_speed {} must be finite and > 0", self.courier_speed)
        })?;
        // Sampling spans the full width `2·h`, which must stay finite too.
        check(
            self.world_half_extent > 0.0 && (2.0 * self.world_half_extent).is_finite(),
            || format!("world_half_extent {} must be > 0 with a finite width", self.world_half_extent),
        )?;
        check(self.cluster_area_size.is_finite() && self.cluster_area_size >= 0.0, || {
            format!("cluster_area_size {} must be finite and ≥ 0", self.cluster_area_size)
        })?;
        check(self.free_moving_threshold.is_finite(), || {
            format!("free_moving_threshold {} must be finite", self.free_moving_threshold)
        })?;
        Ok(())
    }

    /// Total number of restaurants the world will contain.
    #[inline]
    pub fn restaurant_count(&self) -> usize {
        self.restaurant_clusters.saturating_mul(self.restaurants_per_cluster)
    }

    /// `memory_fade` as a fraction.
    #[inline]
    pub fn fade_rate(&self) -> f64 {
        self.memory_fade / 100.0
    }

    /// Per-tick Bernoulli probability of a job arrival.
    #[inline]
    pub fn arrival_probability(&self) -> f64 {
        self.job_arrival_rate / 100.0
    }

    /// Multiplier a candidate must exceed: `1 + switch_threshold%`.
    #[inline]
    pub fn switch_factor(&self) -> f64 {
        1.0 + self.switch_threshold / 100.0
    }

    /// `true` when couriers run the demand-prediction pipeline.
    #[inline]
    pub fn uses_prediction(&self) -> bool {
        self.autonomy_level == AutonomyLevel::High
            && self.learning_model == LearningModel::DemandPrediction
    }

    /// Experiment label in the `key=value_key=value` form the analysis
    /// scripts parse.
    pub fn label(&self) -> String {
        format!(
            "autonomy-level={}_cooperativeness-level={}_use-memory={}_memory-fade={}",
            self.autonomy_level.level(),
            self.cooperativeness_level.level(),
            self.use_memory,
            self.memory_fade,
        )
    }
}
