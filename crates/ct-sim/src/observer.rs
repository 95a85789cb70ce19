//! Simulation observer trait for progress reporting and data collection.

use ct_core::Tick;

use crate::{DeliveryEvent, SimMetrics};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// The metrics snapshot is only built on ticks where
/// [`wants_metrics`](SimObserver::wants_metrics) returns `true`; on other
/// ticks `on_tick_end` is skipped.
///
/// # Example: status printer
///
/// ```rust,ignore
/// struct StatusPrinter { interval: u64 }
///
/// impl SimObserver for StatusPrinter {
///     fn wants_metrics(&self, tick: Tick) -> bool {
///         tick.every(self.interval)
///     }
///
///     fn on_tick_end(&mut self, tick: Tick, metrics: &SimMetrics) {
///         if tick.every(self.interval) {
///             println!("{tick}: {:?}", metrics.status_counts);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per settled delivery, after the tick's courier pass.
    fn on_delivery(&mut self, _event: &DeliveryEvent) {}

    /// Whether to build a [`SimMetrics`] snapshot and call `on_tick_end`
    /// for `tick`.
    fn wants_metrics(&self, _tick: Tick) -> bool {
        true
    }

    /// Called at the end of each tick with a fresh metrics snapshot, when
    /// `wants_metrics` asked for one.
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &SimMetrics) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {
    fn wants_metrics(&self, _tick: Tick) -> bool {
        false
    }
}
