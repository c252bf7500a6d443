//! Unit tests for hv-bee.

#[cfg(test)]
mod helpers {
    use hv_core::{BeeId, Vec2};

    use crate::{Bee, BeeParams, Wander};

    pub fn bee_at(x: f32, y: f32) -> Bee {
        Bee::new(BeeId(0), Vec2::new(x, y), 0.0, 14.0, 17.5)
    }

    /// Default params with the random early idle drop disabled.
    pub fn params() -> BeeParams {
        let mut p = BeeParams::default();
        p.cfg.walk_idle_chance = 0.0;
        p
    }

    pub fn wander() -> Wander {
        Wander::new(7, 0.015)
    }
}

// ── State entry ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod enter_state {
    use hv_core::SimRng;

    use super::helpers::{bee_at, params, wander};
    use crate::{Mode, StepContext};

    #[test]
    fn same_state_keeps_counter() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(1);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Walk, Some(500), &p, &mut rng);
        let ctx = StepContext::new(0, &p, &w);
        for _ in 0..5 {
            bee.step(&ctx, &mut rng);
        }
        assert_eq!(bee.state_counter(), 5);

        bee.enter_state(Mode::Walk, None, &p, &mut rng);
        assert_eq!(bee.state_counter(), 5);
        assert_eq!(bee.state_duration(), 500);

        bee.enter_state(Mode::Walk, Some(42), &p, &mut rng);
        assert_eq!(bee.state_counter(), 5);
        assert_eq!(bee.state_duration(), 42);
    }

    #[test]
    fn change_resets_counter() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(1);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Walk, Some(500), &p, &mut rng);
        bee.step(&StepContext::new(0, &p, &w), &mut rng);
        bee.enter_state(Mode::Turn, None, &p, &mut rng);
        assert_eq!(bee.mode(), Mode::Turn);
        assert_eq!(bee.state_counter(), 0);
        assert_eq!(bee.state_duration(), 0);
    }

    #[test]
    fn protective_cooldown_only_for_some_states() {
        let p = params();
        let mut rng = SimRng::new(1);
        for mode in Mode::ALL {
            let mut bee = bee_at(0.0, 0.0);
            bee.enter_state(Mode::Blocked, None, &p, &mut rng);
            bee.enter_state(mode, None, &p, &mut rng);
            let expected = matches!(mode, Mode::Flutter | Mode::Takeoff | Mode::Hover | Mode::Land);
            assert_eq!(bee.cooldown() > 0, expected, "{mode}");
        }
    }

    #[test]
    fn hover_snapshots_anchor() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(3);
        let mut bee = bee_at(50.0, 60.0);
        bee.z = 1.0;
        bee.heading = 0.4;
        bee.enter_state(Mode::Hover, Some(1_000), &p, &mut rng);
        let orbit = bee.hover_orbit();
        assert_eq!(orbit.anchor, bee.pos);
        assert!((orbit.radius - 7.0).abs() < 1e-4);
        assert!(orbit.direction == 1.0 || orbit.direction == -1.0);

        let ctx = StepContext::new(0, &p, &w);
        bee.step(&ctx, &mut rng);
        assert_eq!(bee.pos, orbit.anchor);
        for _ in 0..20 {
            bee.step(&ctx, &mut rng);
        }
        assert!((bee.pos.distance(orbit.anchor) - 7.0).abs() < 1e-3);
        assert_eq!(bee.heading, 0.4);
        assert_eq!(bee.mode(), crate::Mode::Hover);
    }

    #[test]
    fn lock_never_shortens() {
        let mut bee = bee_at(0.0, 0.0);
        bee.lock(10, 20);
        bee.lock(5, 5);
        assert_eq!((bee.dwell(), bee.cooldown()), (10, 20));
        bee.tick_counters();
        assert_eq!((bee.dwell(), bee.cooldown()), (9, 19));
        assert!(bee.is_locked());
    }
}

// ── Behaviour ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod behavior {
    use std::f32::consts::FRAC_PI_2;

    use hv_core::{SimRng, Vec2};

    use super::helpers::{bee_at, params, wander};
    use crate::behavior::weighted_index;
    use crate::{Mode, StepContext, Target};

    #[test]
    fn idle_leaves_on_time() {
        let p = params();
        let w = wander();
        for seed in 0..20 {
            let mut rng = SimRng::new(seed);
            let mut bee = bee_at(0.0, 0.0);
            assert!(!bee.has_target());
            bee.step(&StepContext::new(0, &p, &w), &mut rng);
            let duration = bee.state_duration();
            assert!(duration >= 60 && duration <= 180);

            let mut left_at = None;
            for frame in 2..=duration + 1 {
                bee.step(&StepContext::new(frame as u64, &p, &w), &mut rng);
                if bee.mode() != Mode::Idle {
                    left_at = Some(frame);
                    break;
                }
            }
            assert_eq!(left_at, Some(duration));
            assert!(matches!(bee.mode(), Mode::Walk | Mode::Flutter | Mode::Turn));
        }
    }

    #[test]
    fn takeoff_climbs_into_fly() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(2);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Takeoff, Some(1_000), &p, &mut rng);
        for frame in 0..100 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
            if bee.mode() == Mode::Fly {
                break;
            }
        }
        assert_eq!(bee.mode(), Mode::Fly);
        assert!(bee.z > p.cfg.takeoff_exit_height);
        assert!(!bee.on_ground());
    }

    #[test]
    fn landing_goes_straight_to_walk() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(2);
        let mut bee = bee_at(0.0, 0.0);
        bee.z = 0.1;
        bee.enter_state(Mode::Land, None, &p, &mut rng);
        bee.cooldown = 0;
        for frame in 0..10 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
            if bee.mode() == Mode::Walk {
                break;
            }
        }
        assert_eq!(bee.mode(), Mode::Walk);
        assert_eq!(bee.z, 0.0);
        assert_eq!(bee.cooldown(), 0);
        assert_eq!(bee.state_counter(), 0);
        assert!(bee.on_ground());
    }

    #[test]
    fn fly_holds_a_layer() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(4);
        let mut bee = bee_at(0.0, 0.0);
        bee.z = 1.3;
        bee.enter_state(Mode::Fly, Some(10_000), &p, &mut rng);
        for frame in 0..300 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
        }
        assert!((bee.z - 1.0).abs() < 0.01);
        assert_eq!(bee.layer(), 1);
    }

    #[test]
    fn grounded_states_pin_height() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(4);
        let grounded: Vec<Mode> = Mode::ALL.into_iter().filter(|m| m.is_grounded()).collect();
        assert_eq!(grounded.len(), 5);
        for mode in grounded {
            let mut bee = bee_at(0.0, 0.0);
            bee.enter_state(mode, Some(100), &p, &mut rng);
            bee.z = 0.8;
            bee.step(&StepContext::new(0, &p, &w), &mut rng);
            assert_eq!(bee.z, 0.0, "{mode}");
            assert!(bee.on_ground());
        }
    }

    #[test]
    fn walking_sets_ground_motion_idle_does_not() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(5);
        let mut bee = bee_at(0.0, 0.0);
        bee.step(&StepContext::new(0, &p, &w), &mut rng);
        assert!(!bee.ground_motion());

        bee.enter_state(Mode::Walk, Some(100), &p, &mut rng);
        bee.step(&StepContext::new(1, &p, &w), &mut rng);
        assert!(bee.ground_motion());
    }

    #[test]
    fn steering_turns_toward_target() {
        let mut p = params();
        p.cfg.walk_wander = 0.0;
        let w = wander();
        let mut rng = SimRng::new(1);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Walk, Some(1_000), &p, &mut rng);
        bee.set_target(Target::new(Vec2::new(0.0, 100.0), None, 1_000));
        bee.step(&StepContext::new(0, &p, &w), &mut rng);
        assert!((bee.heading - FRAC_PI_2 * p.cfg.steer_gain_walk).abs() < 1e-5);
        assert_eq!(bee.target().map(|t| t.age), Some(1));
    }

    #[test]
    fn idle_bee_does_not_steer() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(1);
        let mut bee = bee_at(0.0, 0.0);
        bee.set_target(Target::new(Vec2::new(0.0, 100.0), None, 1_000));
        bee.step(&StepContext::new(0, &p, &w), &mut rng);
        assert_eq!(bee.heading, 0.0);
    }

    #[test]
    fn loitering_and_stale_targets_are_replaced() {
        let mut p = params();
        p.cfg.max_arrived_frames = 3;
        let w = wander();
        let mut rng = SimRng::new(1);

        let mut bee = bee_at(10.0, 10.0);
        bee.set_target(Target::new(Vec2::new(12.0, 10.0), None, 1_000));
        for frame in 0..3 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
        }
        assert_eq!(bee.arrived_frames(), 3);
        assert!(!bee.needs_target(&p));
        bee.step(&StepContext::new(3, &p, &w), &mut rng);
        assert!(bee.needs_target(&p));

        let mut bee = bee_at(10.0, 10.0);
        bee.set_target(Target::new(Vec2::new(500.0, 10.0), None, 2));
        for frame in 0..3 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
        }
        assert!(bee.needs_target(&p));
        bee.clear_target();
        assert!(!bee.has_target());
    }

    #[test]
    fn weighted_choice() {
        let w = [0.35, 0.25, 0.15, 0.25];
        assert_eq!(weighted_index(&w, 0.0), 0);
        assert_eq!(weighted_index(&w, 0.4), 1);
        assert_eq!(weighted_index(&w, 0.65), 2);
        assert_eq!(weighted_index(&w, 0.99), 3);
        assert_eq!(weighted_index(&[0.0, 0.0], 0.5), 1);
        assert_eq!(weighted_index(&[], 0.5), 0);
    }

    #[test]
    fn layers() {
        let mut bee = bee_at(0.0, 0.0);
        for (z, layer) in [(0.0, 0), (0.2, 0), (0.6, 1), (1.6, 2), (5.0, 2), (-1.0, 0)] {
            bee.z = z;
            assert_eq!(bee.layer(), layer, "z = {z}");
        }
    }
}

// ── Footprints ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod footprints {
    use hv_core::SimRng;
    use hv_grid::ContentType;

    use super::helpers::{bee_at, params, wander};
    use crate::{FootSide, FootprintParams, Mode, StepContext};

    fn trail() -> FootprintParams {
        FootprintParams { lifetime_frames: 240, step_frames: 8, sticky_frames: 20, scale: 0.35 }
    }

    #[test]
    fn walking_on_pollen_leaves_alternating_prints() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(9);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Walk, Some(10_000), &p, &mut rng);

        let mut prints = Vec::new();
        for frame in 0..40 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
            prints.extend(bee.footprint(Some(ContentType::Pollen), &trail()));
        }
        assert_eq!(prints.len(), 5);
        let sides: Vec<FootSide> = prints.iter().map(|f| f.side).collect();
        assert_eq!(
            sides,
            [FootSide::Left, FootSide::Right, FootSide::Left, FootSide::Right, FootSide::Left]
        );
        assert!(prints.iter().all(|f| f.kind == ContentType::Pollen && f.age == 0));
    }

    #[test]
    fn clean_cells_leave_nothing() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(9);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Walk, Some(10_000), &p, &mut rng);
        for frame in 0..40 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
            assert!(bee.footprint(Some(ContentType::BroodCapped), &trail()).is_none());
            assert!(bee.footprint(None, &trail()).is_none());
        }
    }

    #[test]
    fn sticky_feet_outlast_the_cell() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(9);
        let mut bee = bee_at(0.0, 0.0);
        bee.enter_state(Mode::Walk, Some(10_000), &p, &mut rng);

        bee.step(&StepContext::new(0, &p, &w), &mut rng);
        bee.footprint(Some(ContentType::HoneyCapped), &trail());

        let mut count = 0;
        for frame in 1..60 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
            count += bee.footprint(None, &trail()).map_or(0, |f| {
                assert_eq!(f.kind, ContentType::HoneyCapped);
                1
            });
        }
        // Feet dry after 20 frames: prints at steps 8 and 16 only.
        assert_eq!(count, 2);
        assert_eq!(bee.sticky_kind(), None);
    }

    #[test]
    fn airborne_bees_leave_no_prints() {
        let p = params();
        let w = wander();
        let mut rng = SimRng::new(9);
        let mut bee = bee_at(0.0, 0.0);
        bee.z = 1.0;
        bee.enter_state(Mode::Fly, Some(10_000), &p, &mut rng);
        for frame in 0..200 {
            bee.step(&StepContext::new(frame, &p, &w), &mut rng);
            assert!(bee.z >= 0.3);
            assert!(!bee.on_ground());
            assert!(bee.footprint(Some(ContentType::Pollen), &trail()).is_none());
        }
    }

    #[test]
    fn prints_fade_out() {
        let mut f = crate::Footprint {
            pos: hv_core::Vec2::ZERO,
            heading: 0.0,
            kind: ContentType::Pollen,
            age: 0,
            max_age: 4,
            side: FootSide::Left,
            scale: 1.0,
        };
        assert_eq!(f.opacity(), 1.0);
        f.age = 2;
        assert_eq!(f.opacity(), 0.5);
        f.age = 4;
        assert!(f.is_expired());
        assert_eq!(f.opacity(), 0.0);
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod events {
    use std::f32::consts::PI;

    use hv_core::{BeeId, SimRng, Vec2, angle_diff};

    use super::helpers::{bee_at, params};
    use crate::{Bee, Mode};

    #[test]
    fn scare_flees_away_from_click() {
        let p = params();
        let mut rng = SimRng::new(12);
        let mut bee = bee_at(100.0, 100.0);
        bee.lock(50, 0);
        bee.scare(Vec2::new(90.0, 100.0), &p, &mut rng);

        assert!(bee.has_target());
        assert!(angle_diff(bee.heading, 0.0).abs() <= p.cfg.scare_jitter + 1e-5);
        assert_eq!(bee.mode(), Mode::Takeoff);
        assert_eq!(bee.state_duration(), p.cfg.scare_takeoff_frames);
        assert_eq!(bee.dwell(), 0);
        let t = bee.target().unwrap();
        let d = t.pos.distance(bee.pos);
        assert!(d >= 120.0 - 1e-3 && d <= 260.0 + 1e-3);
        assert!(t.pos.x > bee.pos.x);
    }

    #[test]
    fn scared_flyer_keeps_flying() {
        let p = params();
        let mut rng = SimRng::new(12);
        let mut bee = bee_at(100.0, 100.0);
        bee.z = 1.0;
        bee.enter_state(Mode::Fly, Some(300), &p, &mut rng);
        bee.state_counter = 10;
        bee.scare(Vec2::new(100.0, 120.0), &p, &mut rng);
        assert_eq!(bee.mode(), Mode::Fly);
        assert!(angle_diff(bee.heading, -PI / 2.0).abs() <= p.cfg.scare_jitter + 1e-5);
        // The long flight is cut to a short burst.
        assert_eq!(bee.state_counter(), 10);
        assert_eq!(bee.state_duration(), 10 + p.cfg.scare_takeoff_frames.max(1));
    }

    #[test]
    fn scare_radius_has_floor() {
        let mut p = params();
        assert_eq!(p.scare_radius(), 112.0);
        p.cfg.size = 4.0;
        assert_eq!(p.scare_radius(), 80.0);
    }

    #[test]
    fn edge_placement_aims_inward() {
        let mut rng = SimRng::new(3);
        let mut bee = bee_at(400.0, 300.0);
        for _ in 0..50 {
            bee.place_at_edge(800.0, 600.0, 20.0, &mut rng);
            assert!(bee.is_outside(800.0, 600.0, 10.0));
            assert!(!bee.is_outside(800.0, 600.0, 40.0));
            let to_centre = bee.pos.bearing_to(Vec2::new(400.0, 300.0));
            assert!(angle_diff(bee.heading, to_centre).abs() <= PI / 8.0 + 1e-4);
            assert!(!bee.has_target());
        }
    }

    #[test]
    fn offscreen_spawn_flies_in() {
        let p = params();
        let mut rng = SimRng::new(3);
        let bee = Bee::spawn_offscreen(BeeId(4), 800.0, 600.0, 30.0, &p, &mut rng);
        assert_eq!(bee.mode(), Mode::Fly);
        assert_eq!(bee.z, 1.0);
        assert!(bee.is_outside(800.0, 600.0, 0.0));
        assert!(bee.state_duration() > 0);
    }
}
