//! `ct-jobs`: delivery jobs and their lifecycle.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`job`]       | `Job`                                                     |
//! | [`registry`]  | `JobRegistry`: create / claim / release / complete        |
//! | [`arrival`]   | `ArrivalProcess`: one Bernoulli trial per tick            |
//! | [`view`]      | `RestaurantView`, `BacklogShade`: per-restaurant backlog  |
//! | [`error`]     | `JobError`, `JobResult<T>`                                |
//!
//! # Claim model
//!
//! Availability is a plain flag, not a lock.  A courier checks `available`
//! and sets it false in the same call ([`JobRegistry::try_claim`]); with one
//! thread of control per simulation, the courier processed first in a tick
//! wins any race.
//!
//! ```text
//! create_job ──► available ──try_claim──► held ──complete──► (removed)
//!                    ▲                      │
//!                    └──────release─────────┘
//! ```

pub mod arrival;
pub mod error;
pub mod job;
pub mod registry;
pub mod view;


pub use arrival::ArrivalProcess;
pub use error::{JobError, JobResult};
pub use job::Job;
pub use registry::JobRegistry;
pub use view::{BacklogShade, RestaurantView};
