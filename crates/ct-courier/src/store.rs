//! Courier storage: `CourierStore` (records + knowledge) and `CourierRngs`.
//!
//! # Why two structs?
//!
//! A courier update needs `&mut CourierRng` for its own draws while the
//! store is borrowed for the courier record and its tables.  Keeping the RNGs
//! in a separate `CourierRngs` lets the engine hold both borrows at once:
//!
//! ```ignore
//! let rng = sim.rngs.get_mut(id);
//! let (courier, knowledge) = sim.store.split_mut(id);
//! ```

use ct_core::{CourierId, CourierRng, Point};
use ct_memory::CourierKnowledge;

use crate::{Courier, CourierStatus};

// ── CourierRngs ───────────────────────────────────────────────────────────────

/// Per-courier deterministic RNG state, indexed by `CourierId`.
pub struct CourierRngs {
    pub inner: Vec<CourierRng>,
}

impl CourierRngs {
    /// Allocate and seed `count` per-courier RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| CourierRng::new(global_seed, CourierId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, courier: CourierId) -> &mut CourierRng {
        &mut self.inner[courier.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── CourierStore ──────────────────────────────────────────────────────────────

/// Every courier plus the tables it exclusively owns.
///
/// `couriers[i]` and `knowledge[i]` belong to `CourierId(i)`; both `Vec`s
/// always have the same length.
pub struct CourierStore {
    pub couriers: Vec<Courier>,
    pub knowledge: Vec<CourierKnowledge>,
}

impl CourierStore {
    #[inline]
    pub fn len(&self) -> usize {
        self.couriers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.couriers.is_empty()
    }

    /// Iterator over all `CourierId`s in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CourierId> + '_ {
        (0..self.couriers.len() as u32).map(CourierId)
    }

    #[inline]
    pub fn get(&self, id: CourierId) -> Option<&Courier> {
        self.couriers.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: CourierId) -> Option<&mut Courier> {
        self.couriers.get_mut(id.index())
    }

    #[inline]
    pub fn knowledge(&self, id: CourierId) -> Option<&CourierKnowledge> {
        self.knowledge.get(id.index())
    }

    /// Disjoint mutable borrows of one courier's record and tables.
    pub fn split_mut(&mut self, id: CourierId) -> Option<(&mut Courier, &mut CourierKnowledge)> {
        let courier = self.couriers.get_mut(id.index())?;
        let knowledge = self.knowledge.get_mut(id.index())?;
        Some((courier, knowledge))
    }

    /// Couriers per status, indexed by [`CourierStatus::index`].
    pub fn status_counts(&self) -> [usize; CourierStatus::COUNT] {
        let mut counts = [0; CourierStatus::COUNT];
        for c in &self.couriers {
            counts[c.status.index()] += 1;
        }
        counts
    }

    /// Waiting couriers within `radius` of `pos`.
    pub fn waiting_within(&self, pos: Point, radius: f64) -> usize {
        self.couriers
            .iter()
            .filter(|c| c.status == CourierStatus::Waiting && c.location.within(pos, radius))
            .count()
    }
}
