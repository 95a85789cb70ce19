//! `ct-courier`: courier state, movement and storage.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`courier`]  | `Courier`, `CourierStatus`, `JobKind`, `Relocation`        |
//! | [`movement`] | `step_toward`, `step_forward`, `wander`, `has_arrived`     |
//! | [`store`]    | `CourierStore` (records + knowledge), `CourierRngs`        |
//! | [`builder`]  | `CourierStoreBuilder`                                      |
//!
//! # Status is the source of truth
//!
//! Every derived view (colour, per-state counts) is computed from
//! [`CourierStatus`]; nothing else records what a courier is doing.

pub mod builder;
pub mod courier;
pub mod movement;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::CourierStoreBuilder;
pub use courier::{Courier, CourierStatus, JobKind, Relocation};
pub use movement::{has_arrived, step_forward, step_toward, wander, StepOutcome};
pub use store::{CourierRngs, CourierStore};
