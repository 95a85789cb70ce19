//! Unit tests for ct-behavior.

#[cfg(test)]
mod helpers {
    use ct_core::{CourierId, JobId, Point, RestaurantId, SimConfig, Tick};
    use ct_courier::Courier;
    use ct_jobs::JobRegistry;
    use ct_memory::CourierKnowledge;
    use ct_world::{World, WorldBuilder};

    /// r0:(0,0)  r1:(3,0)  r2:(30,30)
    pub fn world() -> World {
        let mut b = WorldBuilder::new(50.0);
        let c = b.add_cluster(Point::ORIGIN);
        b.add_restaurant(c, Point::new(0.0, 0.0)).unwrap();
        b.add_restaurant(c, Point::new(3.0, 0.0)).unwrap();
        b.add_restaurant(c, Point::new(30.0, 30.0)).unwrap();
        b.build().unwrap()
    }

    pub fn config(opportunistic: bool) -> SimConfig {
        SimConfig {
            opportunistic_switch: opportunistic,
            switch_threshold: 30.0,
            neighbourhood_size: 10.0,
            ..SimConfig::default()
        }
    }

    /// Held job of reward 5 at r0 and a reward-7 job waiting at r1.  The
    /// courier stands at (2.5, 0), halfway back to r0 relative to the
    /// 5-unit trip.
    pub fn switching_setup(world: &World, cfg: &SimConfig) -> (JobRegistry, Courier, CourierKnowledge, JobId, JobId) {
        let mut jobs = JobRegistry::new();
        let held = jobs.insert(RestaurantId(0), Point::new(0.0, 0.0), Point::new(0.0, 5.0), Tick(0));
        let better = jobs.insert(RestaurantId(1), Point::new(3.0, 0.0), Point::new(3.0, 7.0), Tick(0));
        assert!(jobs.try_claim(held));

        let mut courier = Courier::new(CourierId(0), RestaurantId(0), Point::new(2.5, 0.0));
        courier.accept_job(held, Point::new(0.0, 0.0), Point::new(0.0, 5.0), false, Tick(0));
        let knowledge = CourierKnowledge::new(cfg, world.restaurant_ids());
        (jobs, courier, knowledge, held, better)
    }
}

#[cfg(test)]
mod switching {
    use crate::{should_switch, HeldJob};

    const F: f64 = 1.3;

    fn held(reward: f64, progress_left: f64) -> Option<HeldJob> {
        Some(HeldJob { reward, remaining: progress_left * 10.0, trip_length: 10.0 })
    }

    #[test]
    fn opportunistic_holding_needs_threshold() {
        assert!(should_switch(7.0, held(5.0, 0.5), None, true, F));
        assert!(!should_switch(6.5, held(5.0, 0.5), None, true, F));
    }

    #[test]
    fn opportunistic_free_always_takes() {
        assert!(should_switch(0.1, None, Some(100.0), true, F));
    }

    #[test]
    fn non_opportunistic_free_compares_return_target() {
        assert!(should_switch(1.0, None, None, false, F));
        assert!(should_switch(13.1, None, Some(10.0), false, F));
        assert!(!should_switch(13.0, None, Some(10.0), false, F));
    }

    #[test]
    fn non_opportunistic_holding_pays_abandon_cost() {
        let job = held(5.0, 0.5).unwrap();
        assert!((job.abandon_cost() - 2.5).abs() < 1e-12);
        // 7 > 6.5 but 7 ≤ 7.5.
        assert!(!should_switch(7.0, Some(job), None, false, F));
        assert!(should_switch(7.6, Some(job), None, false, F));
        // Nearly done: cheap to abandon, but the threshold still applies.
        assert!(!should_switch(6.0, held(5.0, 0.0), None, false, F));
    }

    #[test]
    fn zero_length_trip_is_guarded() {
        let job = HeldJob { reward: 5.0, remaining: 0.0, trip_length: 0.0 };
        assert_eq!(job.abandon_cost(), 0.0);
    }
}

#[cfg(test)]
mod policy {
    use ct_core::{RestaurantId, SimConfig};
    use ct_memory::RewardMemory;
    use crate::{memory_rest_choice, should_give_up_waiting};

    fn cfg() -> SimConfig {
        SimConfig { use_memory: true, free_moving_threshold: 10.0, ..SimConfig::default() }
    }

    #[test]
    fn relocates_only_above_threshold_and_elsewhere() {
        let mut m = RewardMemory::new(5);
        m.record(RestaurantId(2), 6.0);
        m.find_best_restaurant();
        assert_eq!(memory_rest_choice(&m, &cfg(), None), None);

        m.record(RestaurantId(2), 6.0);
        m.find_best_restaurant();
        assert_eq!(memory_rest_choice(&m, &cfg(), None), Some(RestaurantId(2)));
        assert_eq!(memory_rest_choice(&m, &cfg(), Some(RestaurantId(2))), None);

        let off = SimConfig { use_memory: false, ..cfg() };
        assert_eq!(memory_rest_choice(&m, &off, None), None);
    }

    #[test]
    fn gives_up_once_memory_fades() {
        let mut m = RewardMemory::new(5);
        assert!(!should_give_up_waiting(&m, &cfg()), "no memory yet: keep waiting");
        m.record(RestaurantId(0), 10.0);
        m.find_best_restaurant();
        assert!(should_give_up_waiting(&m, &cfg()));
        m.record(RestaurantId(0), 1.0);
        m.find_best_restaurant();
        assert!(!should_give_up_waiting(&m, &cfg()));
    }
}

#[cfg(test)]
mod strategy {
    use ct_core::{AutonomyLevel, LearningModel, RestaurantId, SimConfig, Tick, TimeBlock};
    use ct_courier::{CourierStatus, Relocation};
    use crate::{select_strategy, DecisionContext, DecisionStrategy, LearningStrategy, PredictionStrategy, SwitchDecision};

    #[test]
    fn strategy_selection() {
        let low = SimConfig { autonomy_level: AutonomyLevel::Medium, ..SimConfig::default() };
        assert!(select_strategy(&low).is_none());

        let pred = SimConfig { autonomy_level: AutonomyLevel::High, ..SimConfig::default() };
        assert_eq!(select_strategy(&pred).map(|s| s.name()), Some("demand-prediction"));

        let learn = SimConfig { learning_model: LearningModel::LearningAndAdaptation, ..pred };
        assert_eq!(select_strategy(&learn).map(|s| s.name()), Some("learning-and-adaptation"));
    }

    #[test]
    fn opportunistic_switch_to_better_job() {
        let world = super::helpers::world();
        let cfg = super::helpers::config(true);
        let (jobs, courier, knowledge, _, better) = super::helpers::switching_setup(&world, &cfg);
        let waiting = vec![0; world.restaurant_count()];
        let ctx = DecisionContext::new(Tick(0), &cfg, &world, &jobs, &waiting);

        assert_eq!(courier.status, CourierStatus::MovingToRestaurant);
        assert_eq!(PredictionStrategy.reevaluate(&courier, &knowledge, &ctx), SwitchDecision::Take(better));
    }

    #[test]
    fn non_opportunistic_keeps_half_done_job() {
        let world = super::helpers::world();
        let cfg = super::helpers::config(false);
        let (jobs, courier, knowledge, _, _) = super::helpers::switching_setup(&world, &cfg);
        let waiting = vec![0; world.restaurant_count()];
        let ctx = DecisionContext::new(Tick(0), &cfg, &world, &jobs, &waiting);

        assert_eq!(PredictionStrategy.reevaluate(&courier, &knowledge, &ctx), SwitchDecision::Keep);
    }

    #[test]
    fn rest_leg_suppresses_reevaluation() {
        let world = super::helpers::world();
        let cfg = super::helpers::config(true);
        let (jobs, mut courier, knowledge, _, _) = super::helpers::switching_setup(&world, &cfg);
        courier.must_reach_rest = true;
        let waiting = vec![0; world.restaurant_count()];
        let ctx = DecisionContext::new(Tick(0), &cfg, &world, &jobs, &waiting);

        assert_eq!(PredictionStrategy.reevaluate(&courier, &knowledge, &ctx), SwitchDecision::Keep);
        assert_eq!(LearningStrategy.reevaluate(&courier, &knowledge, &ctx), SwitchDecision::Keep);
    }

    #[test]
    fn predictions_start_at_zero_and_heat_waits_for_first_job() {
        let world = super::helpers::world();
        let cfg = super::helpers::config(false);
        let (jobs, mut courier, mut knowledge, _, _) = super::helpers::switching_setup(&world, &cfg);
        let waiting = vec![0; world.restaurant_count()];
        let ctx = DecisionContext::new(Tick(0), &cfg, &world, &jobs, &waiting);

        PredictionStrategy.observe(&courier, &mut knowledge, &ctx);
        for r in world.restaurant_ids() {
            assert_eq!(knowledge.predictor.predicted(r), 0.0);
            assert_eq!(knowledge.patterns.get(r, TimeBlock::Night), 0.0);
            assert_eq!(knowledge.heat.score_of(r), 0.0);
        }
        assert!(PredictionStrategy.choose_rest(&courier, &knowledge, &ctx).is_none());

        // After a delivery the heat map comes alive.
        courier.credit(5.0);
        PredictionStrategy.observe(&courier, &mut knowledge, &ctx);
        // r1 at distance 0.5: 0.3·19.5 + 0.1·5 = 6.35 < 10 threshold.
        assert!((knowledge.heat.score_of(RestaurantId(1)) - 6.35).abs() < 1e-9);
        assert!(PredictionStrategy.choose_rest(&courier, &knowledge, &ctx).is_none());
    }

    #[test]
    fn delivery_learning_drives_heat_choice() {
        let world = super::helpers::world();
        let cfg = SimConfig { learning_rate: 1.0, start_prediction_weight: 1.0, ..super::helpers::config(false) };
        let (jobs, mut courier, mut knowledge, _, _) = super::helpers::switching_setup(&world, &cfg);
        let waiting = vec![0; world.restaurant_count()];
        let ctx = DecisionContext::new(Tick(0), &cfg, &world, &jobs, &waiting);

        courier.credit(20.0);
        PredictionStrategy.on_delivery(RestaurantId(2), 20.0, &mut knowledge, &ctx);
        assert_eq!(knowledge.patterns.get(RestaurantId(2), TimeBlock::Night), 20.0);

        PredictionStrategy.observe(&courier, &mut knowledge, &ctx);
        // r2: 0.6·20 + 0 (far) + 0.5 = 12.5 > 10
        assert_eq!(
            PredictionStrategy.choose_rest(&courier, &knowledge, &ctx),
            Some((RestaurantId(2), Relocation::Prediction))
        );
        assert_eq!(LearningStrategy.choose_rest(&courier, &knowledge, &ctx), None);
    }
}
