//! Unit tests for ct-world.
//!
//! Hand-placed worlds keep the spatial assertions exact.

#[cfg(test)]
mod helpers {
    use ct_core::{Point, RestaurantId};
    use crate::{World, WorldBuilder};

    /// Two clusters, three restaurants:
    ///
    ///   r0:(0,0) r1:(3,0)   in cluster 0
    ///   r2:(30,30)          in cluster 1
    pub fn small_world() -> (World, [RestaurantId; 3]) {
        let mut b = WorldBuilder::new(50.0);
        let c0 = b.add_cluster(Point::new(1.0, 0.0));
        let c1 = b.add_cluster(Point::new(30.0, 30.0));
        let r0 = b.add_restaurant(c0, Point::new(0.0, 0.0)).unwrap();
        let r1 = b.add_restaurant(c0, Point::new(3.0, 0.0)).unwrap();
        let r2 = b.add_restaurant(c1, Point::new(30.0, 30.0)).unwrap();
        (b.build().unwrap(), [r0, r1, r2])
    }
}

#[cfg(test)]
mod builder {
    use ct_core::{ClusterId, Point};
    use crate::{WorldBuilder, WorldError};

    #[test]
    fn empty_build_is_rejected() {
        assert!(matches!(WorldBuilder::new(10.0).build(), Err(WorldError::Empty)));
    }

    #[test]
    fn unknown_cluster_is_rejected() {
        let mut b = WorldBuilder::new(10.0);
        let err = b.add_restaurant(ClusterId(3), Point::ORIGIN).unwrap_err();
        assert!(matches!(err, WorldError::ClusterNotFound(ClusterId(3))));
    }

    #[test]
    fn out_of_bounds_restaurant_is_rejected() {
        let mut b = WorldBuilder::new(10.0);
        let c = b.add_cluster(Point::ORIGIN);
        assert!(matches!(
            b.add_restaurant(c, Point::new(11.0, 0.0)),
            Err(WorldError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn ids_are_sequential() {
        let (world, [r0, r1, r2]) = super::helpers::small_world();
        assert_eq!((r0.0, r1.0, r2.0), (0, 1, 2));
        assert_eq!(world.restaurant_count(), 3);
        assert_eq!(world.cluster_count(), 2);
    }
}

#[cfg(test)]
mod queries {
    use ct_core::{Point, RestaurantId};

    #[test]
    fn nearest_restaurant() {
        let (world, [r0, r1, r2]) = super::helpers::small_world();
        assert_eq!(world.nearest_restaurant(Point::new(-1.0, 0.0)), Some(r0));
        assert_eq!(world.nearest_restaurant(Point::new(2.0, 0.5)), Some(r1));
        assert_eq!(world.nearest_restaurant(Point::new(40.0, 40.0)), Some(r2));
    }

    #[test]
    fn restaurants_within_radius_sorted() {
        let (world, [r0, r1, _]) = super::helpers::small_world();
        assert_eq!(world.restaurants_within(Point::new(1.5, 0.0), 2.0), vec![r0, r1]);
        // Boundary is inclusive.
        assert_eq!(world.restaurants_within(Point::new(0.0, 0.0), 3.0), vec![r0, r1]);
        assert!(world.restaurants_within(Point::new(-20.0, -20.0), 1.0).is_empty());
    }

    #[test]
    fn lookup_miss_is_none() {
        let (world, _) = super::helpers::small_world();
        assert!(world.restaurant(RestaurantId(99)).is_none());
        assert!(world.location_of(RestaurantId::INVALID).is_none());
        assert!(world.try_location_of(RestaurantId(99)).is_err());
    }

    #[test]
    fn distance_to_restaurant() {
        let (world, [_, r1, _]) = super::helpers::small_world();
        assert_eq!(world.distance_to(Point::new(3.0, 4.0), r1), Some(4.0));
    }

    #[test]
    fn blocked_outside_bounds() {
        let (world, _) = super::helpers::small_world();
        assert!(!world.is_blocked(Point::new(50.0, -50.0)));
        assert!(world.is_blocked(Point::new(50.1, 0.0)));
    }
}

#[cfg(test)]
mod generation {
    use ct_core::{SimConfig, SimRng};
    use crate::WorldBuilder;

    fn config() -> SimConfig {
        SimConfig {
            restaurant_clusters: 4,
            restaurants_per_cluster: 5,
            cluster_area_size: 6.0,
            world_half_extent: 40.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn clustered_counts_and_bounds() {
        let cfg = config();
        let world = WorldBuilder::clustered(&cfg, &mut SimRng::new(3)).unwrap();
        assert_eq!(world.cluster_count(), 4);
        assert_eq!(world.restaurant_count(), 20);
        for r in &world.restaurants {
            assert!(r.location.in_bounds(cfg.world_half_extent));
            let center = world.clusters[r.cluster.index()].center;
            assert!(r.location.distance(center) <= cfg.cluster_area_size + 1e-9);
        }
    }

    #[test]
    fn clustered_is_deterministic() {
        let cfg = config();
        let a = WorldBuilder::clustered(&cfg, &mut SimRng::new(11)).unwrap();
        let b = WorldBuilder::clustered(&cfg, &mut SimRng::new(11)).unwrap();
        assert_eq!(a.restaurants, b.restaurants);
    }

    #[test]
    fn random_point_inside_world() {
        let world = WorldBuilder::clustered(&config(), &mut SimRng::new(1)).unwrap();
        let mut rng = SimRng::new(2);
        for _ in 0..500 {
            assert!(!world.is_blocked(world.random_point(rng.inner())));
        }
        assert!(world.random_restaurant(rng.inner()).is_some());
    }
}
