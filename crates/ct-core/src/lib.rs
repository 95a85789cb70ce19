//! `ct-core`: foundational types for the courier twin.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `CourierId`, `RestaurantId`, `ClusterId`, `JobId`          |
//! | [`geo`]         | `Point`, Euclidean distance, heading/step helpers          |
//! | [`time`]        | `Tick`, `SimClock`, `TimeBlock`                            |
//! | [`rng`]         | `CourierRng` (per-courier), `SimRng` (global)              |
//! | [`config`]      | `SimConfig` and its enums                                  |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AutonomyLevel, Cooperativeness, FadeStrategy, LearningModel, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{Point, ARRIVAL_TOLERANCE, SNAP_TOLERANCE};
pub use ids::{ClusterId, CourierId, JobId, RestaurantId};
pub use rng::{CourierRng, SimRng};
pub use time::{SimClock, Tick, TimeBlock, TICKS_PER_DAY, TICKS_PER_BLOCK};
