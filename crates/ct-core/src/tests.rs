//! Unit tests for ct-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CourierId, JobId, RestaurantId};

    #[test]
    fn index_roundtrip() {
        let id = CourierId(42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CourierId::INVALID.0, u32::MAX);
        assert_eq!(RestaurantId::INVALID.0, u32::MAX);
        assert_eq!(JobId::INVALID.0, u64::MAX);
        assert_eq!(RestaurantId::default(), RestaurantId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(RestaurantId(7).to_string(), "RestaurantId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn advanced_along_heading() {
        let p = Point::ORIGIN.advanced(Point::ORIGIN.heading_to(Point::new(0.0, 10.0)), 2.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn heading_to_self_is_zero() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(p.heading_to(p), 0.0);
    }

    #[test]
    fn within_is_inclusive() {
        let a = Point::new(0.0, 0.0);
        assert!(a.within(Point::new(0.5, 0.0), 0.5));
        assert!(!a.within(Point::new(0.51, 0.0), 0.5));
    }

    #[test]
    fn bounds_and_clamp() {
        let p = Point::new(60.0, -3.0);
        assert!(!p.in_bounds(50.0));
        let c = p.clamped(50.0);
        assert_eq!(c, Point::new(50.0, -3.0));
        assert!(c.in_bounds(50.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick, TimeBlock, TICKS_PER_BLOCK, TICKS_PER_DAY};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn every_fires_on_multiples() {
        assert!(Tick(0).every(60));
        assert!(Tick(120).every(60));
        assert!(!Tick(61).every(60));
        assert!(!Tick(0).every(0));
    }

    #[test]
    fn block_boundaries() {
        assert_eq!(TICKS_PER_BLOCK, 14_400);
        assert_eq!(Tick(0).time_block(), TimeBlock::Night);
        assert_eq!(Tick(14_399).time_block(), TimeBlock::Night);
        assert_eq!(Tick(14_400).time_block(), TimeBlock::EarlyMorning);
        assert_eq!(Tick(43_200).time_block(), TimeBlock::Afternoon);
        assert_eq!(Tick(86_399).time_block(), TimeBlock::LateEvening);
        // Wraps into the next day.
        assert_eq!(Tick(TICKS_PER_DAY + 30_000).time_block(), TimeBlock::Morning);
    }

    #[test]
    fn block_index_matches_all() {
        for (i, b) in TimeBlock::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
        assert_eq!(TimeBlock::Evening.to_string(), "16-20");
    }

    #[test]
    fn clock_day_and_hm() {
        let mut clock = SimClock::new();
        for _ in 0..(TICKS_PER_DAY + 3_660) {
            clock.advance();
        }
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.hm(), (1, 1));
        assert_eq!(clock.time_block(), TimeBlock::Night);
    }
}

#[cfg(test)]
mod rng {
    use crate::{CourierId, CourierRng, SimRng};

    #[test]
    fn courier_streams_are_reproducible() {
        let mut r1 = CourierRng::new(12345, CourierId(0));
        let mut r2 = CourierRng::new(12345, CourierId(0));
        for _ in 0..100 {
            let a: f64 = r1.gen_range(-1.0..=1.0);
            let b: f64 = r2.gen_range(-1.0..=1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn adjacent_couriers_diverge() {
        let mut r0 = CourierRng::new(1, CourierId(0));
        let mut r1 = CourierRng::new(1, CourierId(1));
        let a: Vec<u64> = (0..4).map(|_| r0.gen_range(0..u64::MAX)).collect();
        let b: Vec<u64> = (0..4).map(|_| r1.gen_range(0..u64::MAX)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn choose_picks_from_candidates() {
        let mut rng = CourierRng::new(3, CourierId(2));
        assert!(rng.choose::<u32>(&[]).is_none());
        let candidates = [4, 8, 15];
        for _ in 0..50 {
            assert!(candidates.contains(rng.choose(&candidates).unwrap()));
        }
    }

    #[test]
    fn gen_bool_extremes_and_clamping() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.5));
        assert!(!rng.gen_bool(-1.0));
    }

    #[test]
    fn shuffle_is_seeded() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        SimRng::new(9).shuffle(&mut a);
        SimRng::new(9).shuffle(&mut b);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod config {
    use crate::{AutonomyLevel, Cooperativeness, CoreError, FadeStrategy, SimConfig};

    #[test]
    fn default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn label_format() {
        let cfg = SimConfig {
            autonomy_level: AutonomyLevel::High,
            cooperativeness_level: Cooperativeness::Low,
            use_memory: true,
            memory_fade: 5.0,
            ..SimConfig::default()
        };
        assert_eq!(
            cfg.label(),
            "autonomy-level=3_cooperativeness-level=1_use-memory=true_memory-fade=5"
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cfg = SimConfig { switch_threshold: 5.0, ..SimConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));

        let cfg = SimConfig { courier_population: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig { restaurants_per_cluster: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_geometry() {
        for h in [1e308, f64::INFINITY, f64::NAN] {
            let cfg = SimConfig { world_half_extent: h, ..SimConfig::default() };
            assert!(matches!(cfg.validate(), Err(CoreError::Config(_))), "half extent {h}");
        }
        let cfg = SimConfig { courier_speed: f64::INFINITY, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { free_moving_threshold: f64::NAN, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { cluster_area_size: f64::INFINITY, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_overflowing_restaurant_count() {
        let cfg = SimConfig {
            restaurant_clusters: usize::MAX,
            restaurants_per_cluster: 2,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
        assert_eq!(cfg.restaurant_count(), usize::MAX);
    }

    #[test]
    fn derived_rates() {
        let cfg = SimConfig {
            memory_fade: 10.0,
            job_arrival_rate: 25.0,
            switch_threshold: 50.0,
            ..SimConfig::default()
        };
        assert!((cfg.fade_rate() - 0.1).abs() < 1e-12);
        assert!((cfg.arrival_probability() - 0.25).abs() < 1e-12);
        assert!((cfg.switch_factor() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn level_conversions() {
        for lvl in 0..4u8 {
            assert_eq!(AutonomyLevel::from_level(lvl).unwrap().level(), lvl);
        }
        assert!(AutonomyLevel::from_level(4).is_none());
        assert_eq!(Cooperativeness::from_level(2), Some(Cooperativeness::Medium));
        assert!(Cooperativeness::from_level(0).is_none());
        assert_eq!(FadeStrategy::RecencyWeighted.to_string(), "Recency-weighted");
    }
}
