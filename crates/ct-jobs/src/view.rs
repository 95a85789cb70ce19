//! Read-only per-restaurant backlog, refreshed on a fixed period for the
//! display collaborator.

use ct_core::RestaurantId;
use ct_world::World;

use crate::JobRegistry;

/// Display bucket for a restaurant's backlog.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BacklogShade {
    #[default]
    Idle,
    Light,
    Busy,
    Overloaded,
}

impl BacklogShade {
    pub fn from_backlog(waiting: usize) -> Self {
        match waiting {
            0 => BacklogShade::Idle,
            1..=2 => BacklogShade::Light,
            3..=5 => BacklogShade::Busy,
            _ => BacklogShade::Overloaded,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BacklogShade::Idle       => "gray",
            BacklogShade::Light      => "yellow",
            BacklogShade::Busy       => "orange",
            BacklogShade::Overloaded => "red",
        }
    }
}

/// Snapshot of waiting jobs per restaurant, indexed by `RestaurantId`.
#[derive(Clone, Debug, Default)]
pub struct RestaurantView {
    backlog: Vec<usize>,
}

impl RestaurantView {
    pub fn new(world: &World) -> Self {
        Self { backlog: vec![0; world.restaurant_count()] }
    }

    pub fn refresh(&mut self, world: &World, registry: &JobRegistry) {
        self.backlog.clear();
        self.backlog.extend(world.restaurant_ids().map(|r| registry.backlog(r)));
    }

    /// Backlog at the last refresh; `0` for unknown ids.
    #[inline]
    pub fn backlog(&self, id: RestaurantId) -> usize {
        self.backlog.get(id.index()).copied().unwrap_or(0)
    }

    pub fn shade(&self, id: RestaurantId) -> BacklogShade {
        BacklogShade::from_backlog(self.backlog(id))
    }

    pub fn total(&self) -> usize {
        self.backlog.iter().sum()
    }
}
