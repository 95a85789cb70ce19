//! `ct-behavior`: how couriers decide where to go.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`context`]    | `DecisionContext<'a>`: read-only tick snapshot               |
//! | [`model`]      | `DecisionStrategy` trait, `select_strategy`                   |
//! | [`prediction`] | `PredictionStrategy`: heat map + route re-evaluation         |
//! | [`learning`]   | `LearningStrategy`: no-op extension point                    |
//! | [`policy`]     | memory relocation / give-up rules shared by levels 2 and 3    |
//! | [`switching`]  | `should_switch`, `HeldJob`, `SwitchDecision`                  |
//!
//! # Design notes
//!
//! Strategies never mutate the job registry or the courier record.  They
//! return a decision value; the engine in `ct-sim` applies it (claims,
//! releases, state transitions) so every mutation happens in one place.
//! The only state a strategy writes is the courier's own
//! [`CourierKnowledge`](ct_memory::CourierKnowledge).

pub mod context;
pub mod learning;
pub mod model;
pub mod policy;
pub mod prediction;
pub mod switching;

#[cfg(test)]
mod tests;

pub use context::DecisionContext;
pub use learning::LearningStrategy;
pub use model::{select_strategy, DecisionStrategy};
pub use policy::{memory_rest_choice, should_give_up_waiting};
pub use prediction::PredictionStrategy;
pub use switching::{should_switch, HeldJob, SwitchDecision};
