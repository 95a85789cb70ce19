//! `ct-world`: the static plane couriers move on.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`world`]  | `Restaurant`, `Cluster`, `World` (R-tree), `WorldBuilder`  |
//! | [`error`]  | `WorldError`, `WorldResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use world::{Cluster, Restaurant, World, WorldBuilder};
