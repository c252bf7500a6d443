//! Unit tests for hv-spatial.

#[cfg(test)]
mod helpers {
    use std::f32::consts::PI;

    use hv_bee::Bee;
    use hv_core::{BeeId, FrameRate, ProximityConfig, Vec2};

    use crate::ProximityParams;

    pub const SIZE: f32 = 14.0;

    pub fn bee(id: u32, x: f32, y: f32, heading: f32) -> Bee {
        Bee::new(BeeId(id), Vec2::new(x, y), heading, SIZE, id as f64 * 31.0)
    }

    /// Two grounded bees 15 px apart, nose to nose.
    pub fn facing_pair() -> Vec<Bee> {
        vec![bee(0, 100.0, 100.0, 0.0), bee(1, 115.0, 100.0, PI)]
    }

    pub fn params(land_preference: f32, cluster_land_boost: f32) -> ProximityParams {
        let cfg = ProximityConfig { land_preference, cluster_land_boost, ..Default::default() };
        ProximityParams::from_config(&cfg, SIZE, FrameRate::default())
    }
}

// ── Hash ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hash {
    use hv_core::Vec2;

    use crate::{BucketKey, SpatialHash};

    #[test]
    fn keys_floor_and_layer() {
        let h = SpatialHash::new(10.0);
        assert_eq!(
            h.key_of(Vec2::new(-0.5, 39.9), 0.0),
            BucketKey { col: -1, row: 3, layer: 0 }
        );
        for (z, layer) in [(0.4, 0), (0.6, 1), (1.5, 2), (3.0, 2), (-1.0, 0), (f32::NAN, 0)] {
            assert_eq!(SpatialHash::layer_of(z), layer, "z = {z}");
        }
    }

    #[test]
    fn query_covers_nine_buckets_on_one_layer() {
        let mut h = SpatialHash::new(10.0);
        h.rebuild([
            (Vec2::new(15.0, 15.0), 0.0), // 0: centre bucket
            (Vec2::new(5.0, 5.0), 0.0),   // 1: diagonal neighbour
            (Vec2::new(29.0, 15.0), 0.0), // 2: right neighbour
            (Vec2::new(35.0, 15.0), 0.0), // 3: two buckets away
            (Vec2::new(15.0, 15.0), 1.0), // 4: same place, airborne
        ]);
        assert_eq!(h.len(), 5);
        let mut found: Vec<usize> = h.query(Vec2::new(15.0, 15.0), 0.1).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);

        let airborne: Vec<usize> = h.query(Vec2::new(15.0, 15.0), 1.2).collect();
        assert_eq!(airborne, vec![4]);
    }

    #[test]
    fn rebuild_replaces_contents() {
        let mut h = SpatialHash::new(10.0);
        h.rebuild([(Vec2::new(1.0, 1.0), 0.0)]);
        h.rebuild([(Vec2::new(500.0, 500.0), 0.0)]);
        assert_eq!(h.len(), 1);
        assert_eq!(h.query(Vec2::new(1.0, 1.0), 0.0).count(), 0);
        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn bucket_size_is_sane() {
        assert_eq!(SpatialHash::new(0.0).bucket_size(), 1.0);
        assert_eq!(SpatialHash::new(f32::NAN).bucket_size(), 1.0);
        let mut h = SpatialHash::new(5.0);
        h.insert(0, Vec2::ZERO, 0.0);
        h.set_bucket_size(20.0);
        assert!(h.is_empty());
    }
}

// ── Proximity ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proximity {
    use hv_bee::{BeeParams, Mode};
    use hv_core::SimRng;

    use super::helpers::{bee, facing_pair, params};
    use crate::ProximityResolver;

    #[test]
    fn facing_grounded_bees_block() {
        let mut bees = facing_pair();
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));
        let mut rng = SimRng::new(1);
        let n = resolver.resolve(&mut bees, |_| false, &BeeParams::default(), &mut rng);
        assert!(n >= 1);
        assert!(bees.iter().any(|b| b.mode() == Mode::Blocked));
        for b in bees.iter().filter(|b| b.mode() == Mode::Blocked) {
            assert!(b.dwell() > 0 && b.cooldown() > 0);
        }
    }

    #[test]
    fn one_reaction_per_frame_then_cooldown() {
        let mut bees = facing_pair();
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));
        let mut rng = SimRng::new(1);
        let bp = BeeParams::default();
        let first = resolver.resolve(&mut bees, |_| false, &bp, &mut rng);
        assert_eq!(first, 2);
        assert_eq!(resolver.resolve(&mut bees, |_| false, &bp, &mut rng), 0);
    }

    #[test]
    fn only_the_bee_facing_reacts() {
        // Bee 0 looks at bee 1; bee 1 looks away.
        let mut bees = vec![bee(0, 100.0, 100.0, 0.0), bee(1, 115.0, 100.0, 0.0)];
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));
        let mut rng = SimRng::new(1);
        assert_eq!(resolver.resolve(&mut bees, |_| false, &BeeParams::default(), &mut rng), 1);
        assert_eq!(bees[0].mode(), Mode::Blocked);
        assert_eq!(bees[1].mode(), Mode::Idle);
    }

    #[test]
    fn far_or_sideways_bees_are_ignored() {
        let mut bees = vec![
            bee(0, 100.0, 100.0, 0.0),
            bee(1, 160.0, 100.0, std::f32::consts::PI), // out of reach
            bee(2, 100.0, 115.0, 0.0),                   // 90° to the side
        ];
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));
        let mut rng = SimRng::new(1);
        resolver.resolve(&mut bees, |_| false, &BeeParams::default(), &mut rng);
        assert_eq!(bees[0].mode(), Mode::Idle);
        assert_eq!(bees[1].mode(), Mode::Idle);
    }

    #[test]
    fn locked_and_turning_bees_are_skipped() {
        let bp = BeeParams::default();
        let mut rng = SimRng::new(1);
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));

        let mut bees = facing_pair();
        bees[0].lock(5, 0);
        bees[1].enter_state(Mode::Turn, None, &bp, &mut rng);
        assert_eq!(resolver.resolve(&mut bees, |_| false, &bp, &mut rng), 0);
        assert_eq!(bees[0].mode(), Mode::Idle);
        assert_eq!(bees[1].mode(), Mode::Turn);
    }

    #[test]
    fn airborne_bees_land_or_hover() {
        let bp = BeeParams::default();
        let mut rng = SimRng::new(1);

        let mut bees = facing_pair();
        bees.iter_mut().for_each(|b| b.z = 1.0);
        ProximityResolver::new(params(1.0, 0.0)).resolve(&mut bees, |_| false, &bp, &mut rng);
        assert!(bees.iter().all(|b| b.mode() == Mode::Land));

        let mut bees = facing_pair();
        bees.iter_mut().for_each(|b| b.z = 1.0);
        ProximityResolver::new(params(0.0, 0.0)).resolve(&mut bees, |_| false, &bp, &mut rng);
        assert!(bees.iter().all(|b| b.mode() == Mode::Hover));

        let mut bees = facing_pair();
        bees.iter_mut().for_each(|b| b.z = 1.0);
        ProximityResolver::new(params(0.0, 1.0)).resolve(&mut bees, |_| true, &bp, &mut rng);
        assert!(bees.iter().all(|b| b.mode() == Mode::Land));
    }

    #[test]
    fn low_lift_bees_react_like_grounded() {
        // z = 0.4 rounds to the ground layer, so the pair blocks even with land_preference = 1.
        let mut bees = facing_pair();
        bees.iter_mut().for_each(|b| b.z = 0.4);
        let mut rng = SimRng::new(1);
        let n = ProximityResolver::new(params(1.0, 0.0)).resolve(&mut bees, |_| false, &BeeParams::default(), &mut rng);
        assert_eq!(n, 2);
        assert!(bees.iter().all(|b| b.mode() == Mode::Blocked));
    }

    #[test]
    fn layers_do_not_interact() {
        let mut bees = facing_pair();
        bees[1].z = 1.0;
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));
        let mut rng = SimRng::new(1);
        assert_eq!(resolver.resolve(&mut bees, |_| false, &BeeParams::default(), &mut rng), 0);
    }

    #[test]
    fn airborne_reach_is_shorter() {
        // 20 px apart: inside the ground reach (25.2), outside the air reach (17.6).
        let mut bees = vec![bee(0, 100.0, 100.0, 0.0), bee(1, 120.0, 100.0, std::f32::consts::PI)];
        let mut resolver = ProximityResolver::new(params(0.65, 0.2));
        let mut rng = SimRng::new(1);
        let bp = BeeParams::default();
        bees.iter_mut().for_each(|b| b.z = 1.0);
        assert_eq!(resolver.resolve(&mut bees, |_| false, &bp, &mut rng), 0);

        bees.iter_mut().for_each(|b| b.z = 0.0);
        assert_eq!(resolver.resolve(&mut bees, |_| false, &bp, &mut rng), 2);
    }
}
