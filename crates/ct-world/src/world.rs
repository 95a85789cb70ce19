//! Restaurants, clusters and the world that owns them.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[x, y]` to the nearest `RestaurantId`.  It
//! answers the two queries couriers make every tick: the nearest restaurant
//! to a point, and every restaurant within a radius (neighbourhood scans).
//!
//! Restaurants and clusters are immutable once [`WorldBuilder::build`] has
//! run; ids are dense and index straight into the `Vec`s.

use rand::Rng;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ct_core::{ClusterId, Point, RestaurantId, SimConfig, SimRng};

use crate::{WorldError, WorldResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct RestaurantEntry {
    point: [f64; 2],
    id: RestaurantId,
}

impl RTreeObject for RestaurantEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for RestaurantEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Restaurant / Cluster ──────────────────────────────────────────────────────

/// A pickup location.  Jobs originate here.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restaurant {
    pub id: RestaurantId,
    pub cluster: ClusterId,
    pub location: Point,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    pub id: ClusterId,
    pub center: Point,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// The square plane `[-half_extent, half_extent]²` with its restaurants.
///
/// Do not construct directly; use [`WorldBuilder`].
pub struct World {
    /// Indexed by `RestaurantId`.
    pub restaurants: Vec<Restaurant>,
    /// Indexed by `ClusterId`.
    pub clusters: Vec<Cluster>,
    half_extent: f64,
    spatial_idx: RTree<RestaurantEntry>,
}

impl World {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    /// Iterator over every restaurant id in ascending order.
    pub fn restaurant_ids(&self) -> impl Iterator<Item = RestaurantId> + Clone + '_ {
        self.restaurants.iter().map(|r| r.id)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// `None` for ids that were never built (including `INVALID`).
    #[inline]
    pub fn restaurant(&self, id: RestaurantId) -> Option<&Restaurant> {
        self.restaurants.get(id.index())
    }

    #[inline]
    pub fn location_of(&self, id: RestaurantId) -> Option<Point> {
        self.restaurant(id).map(|r| r.location)
    }

    /// Like [`location_of`](Self::location_of) but as a `WorldResult`, for
    /// setup code that should fail loudly.
    pub fn try_location_of(&self, id: RestaurantId) -> WorldResult<Point> {
        self.location_of(id).ok_or(WorldError::RestaurantNotFound(id))
    }

    /// Distance between a point and a restaurant, or `None` if the id is
    /// unknown.
    #[inline]
    pub fn distance_to(&self, from: Point, id: RestaurantId) -> Option<f64> {
        self.location_of(id).map(|loc| from.distance(loc))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest restaurant to `pos`.  Never `None` for a built world.
    pub fn nearest_restaurant(&self, pos: Point) -> Option<RestaurantId> {
        self.spatial_idx.nearest_neighbor(&[pos.x, pos.y]).map(|e| e.id)
    }

    /// Every restaurant within `radius` of `pos` (inclusive), sorted by id so
    /// callers iterate in a stable order.
    pub fn restaurants_within(&self, pos: Point, radius: f64) -> Vec<RestaurantId> {
        let mut ids: Vec<RestaurantId> = self
            .spatial_idx
            .locate_within_distance([pos.x, pos.y], radius * radius)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    // ── Bounds ────────────────────────────────────────────────────────────

    /// `true` if `pos` lies outside the world square.
    #[inline]
    pub fn is_blocked(&self, pos: Point) -> bool {
        !pos.in_bounds(self.half_extent)
    }

    /// A uniformly random point inside the world.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let h = self.half_extent;
        Point::new(rng.gen_range(-h..=h), rng.gen_range(-h..=h))
    }

    /// A uniformly random restaurant.
    pub fn random_restaurant<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<RestaurantId> {
        if self.restaurants.is_empty() {
            return None;
        }
        Some(self.restaurants[rng.gen_range(0..self.restaurants.len())].id)
    }
}

// ── WorldBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`World`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ct_core::Point;
/// use ct_world::WorldBuilder;
///
/// let mut b = WorldBuilder::new(50.0);
/// let c = b.add_cluster(Point::new(0.0, 0.0));
/// let r = b.add_restaurant(c, Point::new(1.0, 1.0)).unwrap();
/// let world = b.build().unwrap();
/// assert_eq!(world.nearest_restaurant(Point::new(2.0, 2.0)), Some(r));
/// ```
pub struct WorldBuilder {
    half_extent: f64,
    clusters:    Vec<Cluster>,
    restaurants: Vec<Restaurant>,
}

impl WorldBuilder {
    pub fn new(half_extent: f64) -> Self {
        Self { half_extent, clusters: Vec::new(), restaurants: Vec::new() }
    }

    /// Add a cluster centre and return its `ClusterId` (sequential from 0).
    /// The centre is clamped into the world.
    pub fn add_cluster(&mut self, center: Point) -> ClusterId {
        let id = ClusterId(self.clusters.len() as u32);
        self.clusters.push(Cluster { id, center: center.clamped(self.half_extent) });
        id
    }

    /// Add a restaurant to an existing cluster.
    pub fn add_restaurant(&mut self, cluster: ClusterId, location: Point) -> WorldResult<RestaurantId> {
        if cluster.index() >= self.clusters.len() {
            return Err(WorldError::ClusterNotFound(cluster));
        }
        if !location.in_bounds(self.half_extent) {
            return Err(WorldError::OutOfBounds { point: location, half_extent: self.half_extent });
        }
        let id = RestaurantId(self.restaurants.len() as u32);
        self.restaurants.push(Restaurant { id, cluster, location });
        Ok(id)
    }

    pub fn restaurant_count(&self) -> usize { self.restaurants.len() }
    pub fn cluster_count(&self) -> usize { self.clusters.len() }

    /// Generate the clustered layout described by `config`.
    ///
    /// Cluster centres are uniform inside the bounds shrunk by
    /// `cluster_area_size`; restaurants are uniform inside a disc of that
    /// radius around their centre, clamped to the bounds.
    pub fn clustered(config: &SimConfig, rng: &mut SimRng) -> WorldResult<World> {
        let half = config.world_half_extent;
        let area = config.cluster_area_size;
        let span = (half - area).max(0.0);

        let mut b = WorldBuilder::new(half);
        for _ in 0..config.restaurant_clusters {
            let center = Point::new(rng.gen_range(-span..=span), rng.gen_range(-span..=span));
            let cluster = b.add_cluster(center);
            let center = b.clusters[cluster.index()].center;
            for _ in 0..config.restaurants_per_cluster {
                // sqrt keeps the disc density uniform
                let r = area * rng.random::<f64>().sqrt();
                let theta = rng.gen_range(0.0..std::f64::consts::TAU);
                b.add_restaurant(cluster, center.advanced(theta, r).clamped(half))?;
            }
        }
        b.build()
    }

    /// Consume the builder and bulk-load the R-tree.
    pub fn build(self) -> WorldResult<World> {
        if self.restaurants.is_empty() {
            return Err(WorldError::Empty);
        }
        let entries: Vec<RestaurantEntry> = self
            .restaurants
            .iter()
            .map(|r| RestaurantEntry { point: [r.location.x, r.location.y], id: r.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        Ok(World {
            restaurants: self.restaurants,
            clusters: self.clusters,
            half_extent: self.half_extent,
            spatial_idx,
        })
    }
}
