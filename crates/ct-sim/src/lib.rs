//! `ct-sim`: tick loop and courier state machine for the courier twin.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Maintenance: fade memories (every 60), refresh backlog view
//!                   (every 10), aggregate prediction accuracy
//!                   (every debug_interval), roll earnings windows.
//!   ② Snapshot   : waiting couriers near each restaurant.
//!   ③ Couriers   : one update each, in a seeded permutation:
//!                     searching / waiting      → scan, relocate, wander
//!                     moving_to_restaurant     → re-evaluate, step, arrive
//!                     on_job                   → step, deliver, settle
//!   ④ Arrivals   : one Bernoulli trial for a new job.
//!   ⑤ Advance the clock.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`sim`]        | `Sim`: the loop, metrics, invariant audit             |
//! | [`builder`]    | `SimBuilder`                                          |
//! | `engine`       | per-courier state machine (crate-private)             |
//! | [`state`]      | `SimState` run counters, `DeliveryEvent`              |
//! | [`metrics`]    | `SimMetrics` tick snapshot, `RunSummary`              |
//! | [`observer`]   | `SimObserver`, `NoopObserver`                         |
//! | [`experiment`] | `run_replications`                                    |
//! | [`error`]      | `SimError`, `SimResult<T>`                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replications on Rayon's thread pool.              |
//! | `serde`    | `Serialize`/`Deserialize` for metrics and summaries.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ct_core::SimConfig;
//! use ct_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{:?}", sim.summary());
//! ```

pub mod builder;
mod engine;
pub mod error;
pub mod experiment;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod state;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use experiment::run_replications;
pub use metrics::{RunSummary, SimMetrics};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, FADE_PERIOD, VIEW_REFRESH_PERIOD};
pub use state::{DeliveryEvent, SimState};
