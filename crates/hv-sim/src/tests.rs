//! Integration tests for hv-sim.

use hv_bee::{Bee, FootSide, Footprint};
use hv_core::{BeeId, ClusterId, Frame, HiveConfig, Vec2};
use hv_grid::{Axial, Cell, ContentType};

use crate::{Canvas, FrameStats, Hive, HiveBuilder, HiveObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> HiveConfig {
    let mut c = HiveConfig::default();
    c.seed = Some(42);
    // Small clusters so a 400 × 300 canvas has room for several.
    c.clusters.target_size = 10;
    c
}

fn small_hive(config: HiveConfig) -> Hive {
    HiveBuilder::new(config).canvas(400.0, 300.0).build().unwrap()
}

fn grounded_bee(id: u32, x: f32, y: f32) -> Bee {
    Bee::new(BeeId(id), Vec2::new(x, y), 0.0, 14.0, id as f64 * 31.0)
}

fn print_at(x: f32, max_age: u32) -> Footprint {
    Footprint {
        pos:     Vec2::new(x, 0.0),
        heading: 0.0,
        kind:    ContentType::Pollen,
        age:     0,
        max_age,
        side:    FootSide::Left,
        scale:   1.0,
    }
}

#[derive(Default)]
struct Counting {
    starts:     u64,
    ends:       u64,
    run_ends:   u64,
    spawned:    Vec<(ClusterId, bool)>,
    seeds:      Vec<(ClusterId, Axial)>,
    released:   Vec<(ClusterId, Option<Axial>)>,
    max_trail:  usize,
    max_cap:    usize,
    last_frame: Option<Frame>,
    last:       FrameStats,
}

impl HiveObserver for Counting {
    fn on_frame_start(&mut self, _frame: Frame) {
        self.starts += 1;
    }
    fn on_frame_end(&mut self, stats: &FrameStats) {
        self.ends += 1;
        self.max_trail = self.max_trail.max(stats.trail_len);
        self.max_cap = self.max_cap.max(stats.cluster_cap);
        self.last = stats.clone();
    }
    fn on_cluster_spawned(&mut self, id: ClusterId, seed: Axial, user: bool) {
        self.spawned.push((id, user));
        self.seeds.push((id, seed));
    }
    fn on_cluster_released(&mut self, id: ClusterId, seed: Option<Axial>) {
        self.released.push((id, seed));
    }
    fn on_run_end(&mut self, last: Frame) {
        self.run_ends += 1;
        self.last_frame = Some(last);
    }
}

#[derive(Debug, PartialEq)]
enum Draw {
    Clear,
    Cell,
    Print,
    Bee(f32),
}

#[derive(Default)]
struct Recording(Vec<Draw>);

impl Canvas for Recording {
    fn clear(&mut self) {
        self.0.push(Draw::Clear);
    }
    fn fill_cell(&mut self, _cell: &Cell, _radius: f32) {
        self.0.push(Draw::Cell);
    }
    fn draw_footprint(&mut self, _print: &Footprint) {
        self.0.push(Draw::Print);
    }
    fn draw_bee(&mut self, bee: &Bee) {
        self.0.push(Draw::Bee(bee.z));
    }
}

// ── HiveBuilder ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use hv_bee::Mode;
    use hv_core::HiveError;

    use super::*;

    #[test]
    fn default_population_follows_density() {
        let config = test_config();
        let expected = config.sanitized().bee_count(400.0, 300.0);
        let hive = small_hive(config);
        assert_eq!(hive.bees().len(), expected);
        assert!(!hive.grid().is_empty());
    }

    #[test]
    fn bees_fly_in_from_offscreen() {
        let hive = HiveBuilder::new(test_config())
            .canvas(400.0, 300.0)
            .bee_count(25)
            .build()
            .unwrap();
        assert_eq!(hive.bees().len(), 25);
        for bee in hive.bees() {
            assert_eq!(bee.mode(), Mode::Fly);
            assert_eq!(bee.z, 1.0);
            assert!(!bee.on_ground());
        }
    }

    #[test]
    fn zero_bee_count_clamps_to_one() {
        let hive = HiveBuilder::new(test_config()).bee_count(0).build().unwrap();
        assert_eq!(hive.bees().len(), 1);
    }

    #[test]
    fn explicit_bees_are_kept() {
        let hive = HiveBuilder::new(test_config())
            .bees(vec![grounded_bee(0, 10.0, 10.0), grounded_bee(1, 20.0, 20.0)])
            .build()
            .unwrap();
        assert_eq!(hive.bees().len(), 2);
        assert_eq!(hive.bees()[1].pos, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn invalid_canvas_errors() {
        let result = HiveBuilder::new(test_config()).canvas(0.0, 300.0).build();
        assert!(matches!(result, Err(HiveError::InvalidCanvas { .. })));

        let result = HiveBuilder::new(test_config()).canvas(f32::INFINITY, 300.0).build();
        assert!(matches!(result, Err(HiveError::InvalidCanvas { .. })));
    }

    #[test]
    fn non_finite_config_errors() {
        let mut config = test_config();
        config.fps = f32::NAN;
        let result = HiveBuilder::new(config).build();
        assert!(matches!(result, Err(HiveError::Config(_))));
    }

    #[test]
    fn out_of_range_config_is_clamped() {
        let mut config = test_config();
        config.fps = 0.0;
        config.bees.density_ratio = -5.0;
        let hive = small_hive(config);
        assert!(hive.rate().fps() >= 1.0);
        assert!(!hive.bees().is_empty());
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frame_loop {
    use super::*;

    #[test]
    fn observer_sees_every_frame() {
        let mut hive = small_hive(test_config());
        let mut obs = Counting::default();
        hive.run_frames(30, &mut obs);

        assert_eq!(hive.frame(), Frame(30));
        assert_eq!(obs.starts, 30);
        assert_eq!(obs.ends, 30);
        assert_eq!(obs.run_ends, 1);
        assert_eq!(obs.last_frame, Some(Frame(30)));
        assert_eq!(obs.last.frame, 30);
    }

    #[test]
    fn stats_account_for_every_bee() {
        let mut hive = small_hive(test_config());
        let mut obs = Counting::default();
        hive.run_frames(120, &mut obs);

        let stats = hive.stats();
        assert_eq!(stats.bee_count(), hive.bees().len());
        assert_eq!(stats.mode_counts.iter().sum::<usize>(), hive.bees().len());
        assert_eq!(stats, &obs.last);
    }

    #[test]
    fn no_clusters_before_ramp_start() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 2.0; // 120 frames at 60 fps
        let mut hive = small_hive(config);
        let mut obs = Counting::default();

        hive.run_frames(100, &mut obs);
        assert!(obs.spawned.is_empty());
        assert_eq!(hive.clusters().active_count(), 0);
        assert_eq!(hive.stats().cluster_cap, 0);

        hive.run_frames(100, &mut obs);
        assert!(!obs.spawned.is_empty());
        assert!(obs.spawned.iter().all(|&(_, user)| !user));
    }

    #[test]
    fn cap_never_exceeds_ceiling() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        config.clusters.ramp_step_secs = 0.1;
        let max = config.clusters.max_clusters;
        let mut hive = small_hive(config);
        let mut obs = Counting::default();
        hive.run_frames(900, &mut obs);
        assert!(obs.max_cap <= max);
        assert!(hive.clusters().active_count() <= max);
    }

    #[test]
    fn released_clusters_report_their_seed() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        config.clusters.visible_secs = 0.5;
        config.clusters.fade_in_secs = 0.1;
        config.clusters.fade_out_secs = 0.1;
        config.clusters.ring_delay_secs = 0.02;
        config.clusters.cooldown_secs = 0.2;
        let mut hive = small_hive(config);
        let mut obs = Counting::default();
        hive.run_frames(600, &mut obs);

        assert!(!obs.released.is_empty());
        for &(id, seed) in &obs.released {
            let seed = seed.unwrap();
            // Slots are reused, so any spawn of this id may be the one.
            assert!(obs.seeds.contains(&(id, seed)), "{id} released with unknown seed {seed}");
        }
    }

    #[test]
    fn honey_cache_matches_grid() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        let mut hive = small_hive(config);
        hive.run_frames(240, &mut Counting::default());
        for &a in hive.honey_cells() {
            let cell = hive.grid().get(a).unwrap();
            assert!(cell.active);
            assert!(cell.content.is_honey());
        }
    }

    #[test]
    fn trail_never_exceeds_cap() {
        let mut config = test_config();
        config.trail.max_entries = 3;
        config.clusters.ramp_start_secs = 0.0;
        let mut hive = HiveBuilder::new(config)
            .canvas(400.0, 300.0)
            .bee_count(40)
            .build()
            .unwrap();
        let mut obs = Counting::default();
        hive.run_frames(900, &mut obs);
        assert!(obs.max_trail <= 3);
        assert!(hive.trail().len() <= 3);
    }

    #[test]
    fn bees_stay_near_canvas() {
        let mut hive = small_hive(test_config());
        let buffer = hive.bee_params().cfg.edge_buffer_px;
        for _ in 0..600 {
            hive.advance(&mut crate::NoopObserver);
            for bee in hive.bees() {
                assert!(!bee.is_outside(400.0, 300.0, buffer), "bee at {}", bee.pos);
            }
        }
    }

    #[test]
    fn every_bee_gets_a_target() {
        let mut hive = small_hive(test_config());
        hive.run_frames(1, &mut crate::NoopObserver);
        assert!(hive.bees().iter().all(|b| b.has_target()));
    }
}

// ── Click ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod click {
    use std::f32::consts::PI;

    use hv_bee::Mode;
    use hv_core::angle_diff;

    use super::*;

    #[test]
    fn nearby_bee_flees() {
        let mut hive = HiveBuilder::new(test_config())
            .canvas(400.0, 300.0)
            .bees(vec![grounded_bee(0, 100.0, 100.0), grounded_bee(1, 350.0, 250.0)])
            .build()
            .unwrap();
        let jitter = hive.bee_params().cfg.scare_jitter;

        let out = hive.click(Vec2::new(105.0, 100.0), &mut Counting::default());
        assert_eq!(out.scared, 1);

        let near = &hive.bees()[0];
        assert!(near.has_target());
        assert!(matches!(near.mode(), Mode::Takeoff | Mode::Fly));
        // The click is due east, so away is due west.
        assert!(angle_diff(PI, near.heading).abs() <= jitter + 1e-4);

        let far = &hive.bees()[1];
        assert_eq!(far.mode(), Mode::Idle);
        assert!(!far.has_target());
    }

    #[test]
    fn no_user_cluster_before_ramp() {
        let mut hive = small_hive(test_config());
        let centre = Vec2::new(200.0, 150.0);
        let out = hive.click(centre, &mut Counting::default());
        assert_eq!(out.cluster, None);
        assert_eq!(hive.grid().active_count(), 0);
    }

    #[test]
    fn click_seeds_user_cluster() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        let mut hive = small_hive(config);
        let p = hive.grid().nearest_cell_linear(Vec2::new(200.0, 150.0)).0.unwrap().pos();

        let mut obs = Counting::default();
        let out = hive.click(p, &mut obs);
        let id = out.cluster.unwrap();
        assert_eq!(obs.spawned, vec![(id, true)]);
        assert_eq!(hive.clusters().spawn_counts(), (0, 1));
        assert!(hive.grid().is_active(hive.grid().axial_at(p)));

        // Same cell again: already active (or the cap is full), nothing new.
        let again = hive.click(p, &mut obs);
        assert_eq!(again.cluster, None);
        assert_eq!(obs.spawned.len(), 1);
    }

    #[test]
    fn click_off_grid_is_harmless() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        let mut hive = small_hive(config);
        let out = hive.click(Vec2::new(-5_000.0, -5_000.0), &mut Counting::default());
        assert_eq!(out.cluster, None);
        assert_eq!(out.scared, 0);
    }
}

// ── Resize ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resize {
    use super::*;

    #[test]
    fn regrids_and_keeps_bees() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        let mut hive = small_hive(config);
        hive.run_frames(60, &mut Counting::default());
        let bees = hive.bees().len();
        let cells = hive.grid().len();

        hive.resize(800.0, 600.0).unwrap();
        assert_eq!(hive.size(), (800.0, 600.0));
        assert!(hive.grid().len() > cells);
        assert_eq!(hive.grid().active_count(), 0);
        assert_eq!(hive.clusters().active_count(), 0);
        assert!(hive.honey_cells().is_empty());
        assert_eq!(hive.bees().len(), bees);
    }

    #[test]
    fn bad_size_is_rejected() {
        let mut hive = small_hive(test_config());
        let cells = hive.grid().len();
        assert!(hive.resize(f32::NAN, 100.0).is_err());
        assert!(hive.resize(100.0, -1.0).is_err());
        assert_eq!(hive.size(), (400.0, 300.0));
        assert_eq!(hive.grid().len(), cells);
    }
}

// ── Render ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod render {
    use super::*;

    #[test]
    fn draws_cells_then_trail_then_bees_by_height() {
        let mut config = test_config();
        config.clusters.ramp_start_secs = 0.0;
        let mut hive = small_hive(config);
        hive.run_frames(300, &mut Counting::default());

        let mut canvas = Recording::default();
        hive.render(Some(&mut canvas));
        let draws = canvas.0;

        assert_eq!(draws.first(), Some(&Draw::Clear));
        let cells = draws.iter().filter(|d| **d == Draw::Cell).count();
        let prints = draws.iter().filter(|d| **d == Draw::Print).count();
        assert_eq!(cells, hive.grid().len());
        assert_eq!(prints, hive.trail().len());

        let rank = |d: &Draw| match d {
            Draw::Clear => 0,
            Draw::Cell => 1,
            Draw::Print => 2,
            Draw::Bee(_) => 3,
        };
        assert!(draws.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])));

        let heights: Vec<f32> = draws
            .iter()
            .filter_map(|d| match d {
                Draw::Bee(z) => Some(*z),
                _ => None,
            })
            .collect();
        assert_eq!(heights.len(), hive.bees().len());
        assert!(heights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn missing_canvas_is_a_no_op() {
        let mut hive = small_hive(test_config());
        hive.run_frames(5, &mut Counting::default());
        hive.render(None);
        assert_eq!(hive.frame(), Frame(5));
    }
}

// ── TrailBuffer ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod trail {
    use super::*;
    use crate::TrailBuffer;

    #[test]
    fn drops_oldest_beyond_capacity() {
        let mut t = TrailBuffer::new(3);
        for i in 0..5 {
            t.push(print_at(i as f32, 100));
        }
        assert_eq!(t.len(), 3);
        let xs: Vec<f32> = t.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut t = TrailBuffer::new(0);
        t.push(print_at(0.0, 100));
        assert!(t.is_empty());
    }

    #[test]
    fn age_expires_entries() {
        let mut t = TrailBuffer::new(10);
        t.push(print_at(0.0, 2));
        t.push(print_at(1.0, 5));
        assert_eq!(t.age(), 0);
        assert_eq!(t.age(), 1);
        assert_eq!(t.len(), 1);
        assert_eq!(t.iter().next().map(|p| p.age), Some(2));
    }
}

// ── FrameDriver ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use super::*;
    use crate::{FrameDriver, NoopObserver};

    fn hive_at_50fps() -> Hive {
        let mut config = test_config();
        config.fps = 50.0; // 20 ms frames
        small_hive(config)
    }

    #[test]
    fn catches_up_in_whole_frames() {
        let mut hive = hive_at_50fps();
        let mut driver = FrameDriver::for_hive(&hive);
        let mut canvas = Recording::default();

        assert_eq!(driver.on_animation_frame(&mut hive, 1_000.0, Some(&mut canvas), &mut NoopObserver), 0);
        assert_eq!(driver.on_animation_frame(&mut hive, 1_050.0, Some(&mut canvas), &mut NoopObserver), 2);
        assert_eq!(driver.on_animation_frame(&mut hive, 1_060.0, Some(&mut canvas), &mut NoopObserver), 1);
        assert_eq!(hive.frame(), Frame(3));

        // One render per callback, whatever the frame count.
        let clears = canvas.0.iter().filter(|d| **d == Draw::Clear).count();
        assert_eq!(clears, 3);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut hive = hive_at_50fps();
        let mut driver = FrameDriver::for_hive(&hive);
        driver.on_animation_frame(&mut hive, 0.0, None, &mut NoopObserver);
        let n = driver.on_animation_frame(&mut hive, 10_000.0, None, &mut NoopObserver);
        assert_eq!(n, 5);
        assert_eq!(hive.frame(), Frame(5));
    }

    #[test]
    fn reset_primes_again() {
        let mut hive = hive_at_50fps();
        let mut driver = FrameDriver::for_hive(&hive);
        driver.on_animation_frame(&mut hive, 0.0, None, &mut NoopObserver);
        driver.reset();
        assert_eq!(driver.on_animation_frame(&mut hive, 80.0, None, &mut NoopObserver), 0);
        assert_eq!(hive.frame(), Frame(0));
    }
}
