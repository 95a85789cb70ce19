//! Unit tests for ct-courier.

#[cfg(test)]
mod helpers {
    use ct_core::{Point, RestaurantId};
    use ct_world::{World, WorldBuilder};

    /// Two restaurants in a 10×10 square: r0:(0,0), r1:(8,8).
    pub fn world() -> (World, [RestaurantId; 2]) {
        let mut b = WorldBuilder::new(10.0);
        let c = b.add_cluster(Point::ORIGIN);
        let r0 = b.add_restaurant(c, Point::new(0.0, 0.0)).unwrap();
        let r1 = b.add_restaurant(c, Point::new(8.0, 8.0)).unwrap();
        (b.build().unwrap(), [r0, r1])
    }
}

#[cfg(test)]
mod status {
    use crate::CourierStatus;

    #[test]
    fn color_is_a_projection() {
        let colors: Vec<_> = CourierStatus::ALL.iter().map(|s| s.color()).collect();
        assert_eq!(colors, vec!["blue", "yellow", "orange", "green"]);
    }

    #[test]
    fn index_matches_all() {
        for (i, s) in CourierStatus::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
        assert!(CourierStatus::Waiting.is_scanning());
        assert!(!CourierStatus::OnJob.is_scanning());
    }
}

#[cfg(test)]
mod courier {
    use ct_core::{CourierId, JobId, Point, RestaurantId, Tick};
    use crate::{Courier, CourierStatus, JobKind, Relocation};

    fn fresh() -> Courier {
        Courier::new(CourierId(0), RestaurantId(0), Point::ORIGIN)
    }

    #[test]
    fn starts_waiting() {
        let c = fresh();
        assert_eq!(c.status, CourierStatus::Waiting);
        assert!(!c.holds_job());
        assert!(!c.has_completed_first_job);
    }

    #[test]
    fn credit_is_monotonic() {
        let mut c = fresh();
        c.credit(5.0);
        c.credit(-3.0);
        assert_eq!(c.total_reward, 5.0);
        assert_eq!(c.deliveries, 2);
        assert!(c.has_completed_first_job);
    }

    #[test]
    fn earnings_window_rolls() {
        let mut c = fresh();
        c.credit(4.0);
        c.roll_earnings_window();
        assert_eq!(c.earnings_rate, 4.0);
        c.roll_earnings_window();
        assert_eq!(c.earnings_rate, 0.0);
    }

    #[test]
    fn accept_at_origin_goes_on_job() {
        let mut c = fresh();
        c.accept_job(JobId(1), Point::ORIGIN, Point::new(5.0, 0.0), true, Tick(3));
        assert_eq!(c.status, CourierStatus::OnJob);
        assert!(c.to_destination && !c.to_origin);
        assert_eq!(c.next_destination, Some(Point::new(5.0, 0.0)));
        assert_eq!(c.job_kind, JobKind::OnTheFly);
    }

    #[test]
    fn accept_away_from_origin_moves_to_restaurant() {
        let mut c = fresh();
        c.head_to_rest(RestaurantId(1), Point::new(8.0, 8.0), Some(Relocation::Memory));
        c.accept_job(JobId(1), Point::new(3.0, 0.0), Point::new(5.0, 0.0), false, Tick(3));
        assert_eq!(c.status, CourierStatus::MovingToRestaurant);
        assert!(c.to_origin);
        assert_eq!(c.next_destination, Some(Point::new(3.0, 0.0)));
        assert_eq!(c.job_kind, JobKind::Memory);
        assert_eq!(c.target_restaurant, None);
    }

    #[test]
    fn settling_keeps_relocation() {
        let mut c = fresh();
        c.head_to_rest(RestaurantId(1), Point::new(8.0, 8.0), Some(Relocation::Prediction));
        c.must_reach_rest = true;
        c.settle_at_rest();
        assert_eq!(c.status, CourierStatus::Waiting);
        assert_eq!(c.target_restaurant, Some(RestaurantId(1)));
        assert_eq!(c.relocation, Some(Relocation::Prediction));
        assert!(!c.must_reach_rest);
        assert!(c.next_destination.is_none());
    }

    #[test]
    fn drop_job_clears_flags() {
        let mut c = fresh();
        c.accept_job(JobId(9), Point::new(3.0, 0.0), Point::new(5.0, 0.0), false, Tick(0));
        assert_eq!(c.drop_job(), Some(JobId(9)));
        assert!(!c.to_origin && !c.to_destination);
        assert!(c.drop_job().is_none());
    }
}

#[cfg(test)]
mod movement {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use ct_core::{CourierId, CourierRng, Point, RestaurantId};
    use crate::{has_arrived, step_forward, step_toward, wander, Courier, StepOutcome};

    #[test]
    fn steps_at_speed_then_snaps() {
        let (world, _) = super::helpers::world();
        let mut c = Courier::new(CourierId(0), RestaurantId(0), Point::ORIGIN);
        let target = Point::new(5.0, 0.0);

        assert_eq!(step_toward(&mut c, target, 1.0, &world), StepOutcome::Moved);
        assert!((c.location.x - 1.0).abs() < 1e-9);
        assert!(!has_arrived(&c, target));

        step_toward(&mut c, target, 1.0, &world); // x = 2
        step_toward(&mut c, target, 1.0, &world); // x = 3, now within snap range
        assert_eq!(step_toward(&mut c, target, 1.0, &world), StepOutcome::Snapped);
        assert_eq!(c.location, target);
        assert!(has_arrived(&c, target));
    }

    #[test]
    fn blocked_step_retries_once_with_turn() {
        let (world, _) = super::helpers::world();
        let mut c = Courier::new(CourierId(0), RestaurantId(0), Point::new(10.0, 0.0));

        // 45° leaves the world, the 90° retry does not.
        c.heading = FRAC_PI_4;
        assert_eq!(step_forward(&mut c, 1.0, &world), StepOutcome::Moved);
        assert!((c.heading - FRAC_PI_2).abs() < 1e-12);
        assert!((c.location.y - 1.0).abs() < 1e-9);

        // Facing straight out: both tries leave the world, so stay put.
        let mut c = Courier::new(CourierId(0), RestaurantId(0), Point::new(10.0, 0.0));
        c.heading = 0.0;
        assert_eq!(step_forward(&mut c, 1.0, &world), StepOutcome::Blocked);
        assert_eq!(c.location, Point::new(10.0, 0.0));
    }

    #[test]
    fn wander_stays_in_bounds() {
        let (world, _) = super::helpers::world();
        let mut c = Courier::new(CourierId(0), RestaurantId(0), Point::new(9.5, -9.5));
        let mut rng = CourierRng::new(3, CourierId(0));
        for _ in 0..2_000 {
            wander(&mut c, &mut rng, 1.0, &world);
            assert!(c.location.in_bounds(world.half_extent()));
        }
    }
}

#[cfg(test)]
mod store {
    use ct_core::{CourierId, Point, SimConfig, SimRng};
    use crate::{CourierStatus, CourierStoreBuilder};

    #[test]
    fn build_places_couriers_at_restaurants() {
        let (world, [r0, r1]) = super::helpers::world();
        let cfg = SimConfig { courier_population: 5, ..SimConfig::default() };
        let (store, rngs) = CourierStoreBuilder::new(&cfg)
            .with_placements([r1, r0])
            .build(&world, &mut SimRng::new(1));

        assert_eq!(store.len(), 5);
        assert_eq!(rngs.len(), 5);
        assert_eq!(store.knowledge.len(), 5);
        assert_eq!(store.get(CourierId(0)).unwrap().last_restaurant, r1);
        assert_eq!(store.get(CourierId(1)).unwrap().location, Point::ORIGIN);
        for c in &store.couriers {
            assert_eq!(c.status, CourierStatus::Waiting);
            assert!(world.restaurant(c.last_restaurant).is_some());
        }
        // Tables cover every restaurant from the start.
        assert_eq!(store.knowledge(CourierId(4)).unwrap().heat.len(), 2);
    }

    #[test]
    fn status_counts_and_waiting_scan() {
        let (world, [r0, _]) = super::helpers::world();
        let cfg = SimConfig { courier_population: 3, ..SimConfig::default() };
        let (mut store, _) = CourierStoreBuilder::new(&cfg)
            .with_placements([r0, r0, r0])
            .build(&world, &mut SimRng::new(1));
        store.get_mut(CourierId(2)).unwrap().start_searching();

        let counts = store.status_counts();
        assert_eq!(counts[CourierStatus::Waiting.index()], 2);
        assert_eq!(counts[CourierStatus::Searching.index()], 1);
        assert_eq!(counts.iter().sum::<usize>(), 3);
        assert_eq!(store.waiting_within(Point::ORIGIN, 1.0), 2);
        assert_eq!(store.waiting_within(Point::new(8.0, 8.0), 1.0), 0);
        assert!(store.split_mut(CourierId(3)).is_none());
    }
}
