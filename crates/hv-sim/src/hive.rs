//! The `Hive` struct and its frame loop.

use tracing::{debug, info, trace};

use hv_bee::{Bee, BeeParams, FootprintParams, Mode, StepContext, Target, Wander};
use hv_cluster::{ClusterPool, DynamicCap};
use hv_core::{ClusterId, Frame, FrameClock, FrameRate, HiveConfig, HiveError, HiveResult, SimRng, Vec2};
use hv_grid::{Axial, HexGrid};
use hv_spatial::ProximityResolver;

use crate::{Canvas, FrameStats, HiveObserver, TrailBuffer};

/// Random cells tried per frame when looking for an inactive seed.
const SEED_ATTEMPTS: usize = 8;

/// What a click did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Bees sent fleeing.
    pub scared:  usize,
    /// User cluster seeded under the pointer, if any.
    pub cluster: Option<ClusterId>,
}

/// The animation engine.
///
/// `Hive` owns every cell, cluster and bee and advances them one logical
/// frame at a time:
///
/// 1. **Clock**: the frame counter advances; bee dwell locks and cooldowns
///    count down.
/// 2. **Spawn**: at most one automatic cluster, if the dynamic cap has room
///    and the spawn stagger has elapsed.
/// 3. **Clusters**: active clusters update cell opacity; every slot's
///    cooldown ticks.
/// 4. **Trail**: footprints age; expired ones are dropped.
/// 5. **Honey cache**: active honey cells are collected for targeting.
/// 6. **Bees**: from lowest to highest, each bee steps and may leave a
///    footprint.
/// 7. **Orchestration**: retargeting, landing bias over clusters, edge
///    wrap-around and long-distance takeoff.
/// 8. **Proximity**: bees react to neighbours ahead of them.
///
/// Drawing is a separate call ([`Hive::render`]) made after the frame.
///
/// Create via [`HiveBuilder`][crate::HiveBuilder].
pub struct Hive {
    pub(crate) config:      HiveConfig,
    pub(crate) clock:       FrameClock,
    pub(crate) width:       f32,
    pub(crate) height:      f32,
    pub(crate) grid:        HexGrid,
    pub(crate) pool:        ClusterPool,
    pub(crate) cap:         DynamicCap,
    pub(crate) bees:        Vec<Bee>,
    pub(crate) bee_params:  BeeParams,
    pub(crate) prints:      FootprintParams,
    pub(crate) wander:      Wander,
    pub(crate) proximity:   ProximityResolver,
    pub(crate) trail:       TrailBuffer,
    pub(crate) honey_cells: Vec<Axial>,
    pub(crate) rng:         SimRng,
    pub(crate) last_auto_spawn: Option<u64>,
    pub(crate) spawn_stagger:   u64,
    pub(crate) last_stats:      FrameStats,
}

impl Hive {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    pub fn rate(&self) -> FrameRate {
        self.clock.rate
    }

    /// Frames run so far.
    pub fn frame(&self) -> Frame {
        self.clock.current
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut HexGrid {
        &mut self.grid
    }

    pub fn clusters(&self) -> &ClusterPool {
        &self.pool
    }

    pub fn bees(&self) -> &[Bee] {
        &self.bees
    }

    pub fn bees_mut(&mut self) -> &mut [Bee] {
        &mut self.bees
    }

    pub fn bee_params(&self) -> &BeeParams {
        &self.bee_params
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Active honey cells as of the last frame.
    pub fn honey_cells(&self) -> &[Axial] {
        &self.honey_cells
    }

    /// Statistics of the last completed frame.
    pub fn stats(&self) -> &FrameStats {
        &self.last_stats
    }

    /// Dynamic cluster cap at the current frame.
    pub fn cluster_cap(&self) -> usize {
        self.cap.effective(self.clock.current.0, self.grid.len(), self.pool.average_active_size())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run exactly `n` frames, then call `on_run_end`.
    pub fn run_frames<O: HiveObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.advance(observer);
        }
        observer.on_run_end(self.clock.current);
    }

    /// Advance the simulation by one logical frame.
    pub fn advance<O: HiveObserver>(&mut self, observer: &mut O) -> &FrameStats {
        self.clock.advance();
        let frame = self.clock.current;
        observer.on_frame_start(frame);

        for bee in &mut self.bees {
            bee.tick_counters();
        }

        let cap = self.cluster_cap();
        self.maybe_spawn(frame.0, cap, observer);

        for id in self.pool.update(&mut self.grid) {
            let seed = self.pool.get(id).and_then(|c| c.seed());
            observer.on_cluster_released(id, seed);
        }

        self.trail.age();
        self.refresh_honey_cells();
        self.step_bees(frame.0);
        self.orchestrate_bees(frame.0);

        let grid = &self.grid;
        let hits = self.proximity.resolve(
            &mut self.bees,
            |p| is_over_active(grid, p),
            &self.bee_params,
            &mut self.rng,
        );
        if hits > 0 {
            trace!(frame = frame.0, hits, "proximity pass");
        }

        self.last_stats = self.collect_stats(frame.0, cap, hits);
        observer.on_frame_end(&self.last_stats);
        &self.last_stats
    }

    /// Draw the current state.  `None` (no surface this frame) draws nothing.
    pub fn render(&self, canvas: Option<&mut dyn Canvas>) {
        let Some(canvas) = canvas else {
            return;
        };
        canvas.clear();
        let radius = self.grid.radius();
        for cell in self.grid.iter() {
            canvas.fill_cell(cell, radius);
        }
        for print in self.trail.iter() {
            canvas.draw_footprint(print);
        }
        for i in self.bees_by_height() {
            canvas.draw_bee(&self.bees[i]);
        }
    }

    // ── External events ───────────────────────────────────────────────────

    /// Pointer click at canvas point `p`.
    ///
    /// Bees within the scare radius flee.  Independently, if the cluster cap
    /// has room, the cell under the pointer seeds a user cluster; an active
    /// cell or a click off the grid does nothing.
    pub fn click<O: HiveObserver>(&mut self, p: Vec2, observer: &mut O) -> ClickOutcome {
        let mut outcome = ClickOutcome::default();

        let radius = self.bee_params.scare_radius();
        let radius_sq = radius * radius;
        for bee in &mut self.bees {
            if bee.pos.distance_sq(p) < radius_sq {
                bee.scare(p, &self.bee_params, &mut self.rng);
                outcome.scared += 1;
            }
        }

        let cap = self.cluster_cap();
        let seed = match self.grid.nearest_cell_to(p) {
            (Some(cell), _) => Some(cell.axial),
            (None, _) => None,
        };
        if let Some(seed) = seed {
            match self.pool.try_spawn(&mut self.grid, seed, true, cap, &mut self.rng) {
                Ok(id) => {
                    observer.on_cluster_spawned(id, seed, true);
                    outcome.cluster = Some(id);
                }
                Err(e) => debug!(seed = %seed, error = %e, "click spawn rejected"),
            }
        }
        debug!(x = p.x, y = p.y, scared = outcome.scared, "click");
        outcome
    }

    /// The canvas changed size.  The grid is rebuilt to cover it and every
    /// cluster is dropped; bees keep their state.
    pub fn resize(&mut self, width: f32, height: f32) -> HiveResult<()> {
        check_canvas(width, height)?;
        self.width = width;
        self.height = height;
        self.grid = HexGrid::covering(width, height, self.grid.radius());
        self.pool.reset();
        self.honey_cells.clear();
        self.last_auto_spawn = None;
        info!(width, height, cells = self.grid.len(), "hive resized");
        Ok(())
    }

    // ── Frame phases ──────────────────────────────────────────────────────

    fn maybe_spawn<O: HiveObserver>(&mut self, frame: u64, cap: usize, observer: &mut O) {
        if self.pool.active_count() >= cap {
            return;
        }
        if let Some(last) = self.last_auto_spawn {
            if frame.saturating_sub(last) < self.spawn_stagger {
                return;
            }
        }
        let Some(seed) = self.pick_inactive_cell() else {
            return;
        };
        match self.pool.try_spawn(&mut self.grid, seed, false, cap, &mut self.rng) {
            Ok(id) => {
                self.last_auto_spawn = Some(frame);
                observer.on_cluster_spawned(id, seed, false);
            }
            Err(e) => debug!(seed = %seed, error = %e, "auto spawn rejected"),
        }
    }

    fn pick_inactive_cell(&mut self) -> Option<Axial> {
        for _ in 0..SEED_ATTEMPTS {
            match self.grid.random_cell(&mut self.rng) {
                Some(cell) if !cell.active => return Some(cell.axial),
                Some(_) => continue,
                None => return None,
            }
        }
        None
    }

    fn refresh_honey_cells(&mut self) {
        self.honey_cells.clear();
        self.honey_cells.extend(
            self.grid
                .iter()
                .filter(|c| c.active && c.content.is_honey())
                .map(|c| c.axial),
        );
    }

    /// Bee indices ordered by height, lowest first.  Ties keep index order.
    fn bees_by_height(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.bees.len()).collect();
        order.sort_by(|&a, &b| self.bees[a].z.total_cmp(&self.bees[b].z));
        order
    }

    fn step_bees(&mut self, frame: u64) {
        let order = self.bees_by_height();
        let ctx = StepContext::new(frame, &self.bee_params, &self.wander);
        for i in order {
            let bee = &mut self.bees[i];
            bee.step(&ctx, &mut self.rng);

            let under = match self.grid.nearest_cell_to(bee.pos) {
                (Some(cell), _) if cell.active => Some(cell.content),
                _ => None,
            };
            if let Some(print) = bee.footprint(under, &self.prints) {
                self.trail.push(print);
            }
        }
    }

    fn orchestrate_bees(&mut self, frame: u64) {
        let fps = self.clock.rate.fps().round().max(1.0) as u64;
        let c = &self.bee_params.cfg;

        for (i, bee) in self.bees.iter_mut().enumerate() {
            if bee.needs_target(&self.bee_params) {
                let target = pick_target(
                    &self.grid,
                    &self.honey_cells,
                    self.width,
                    self.height,
                    &self.bee_params,
                    &mut self.rng,
                );
                bee.set_target(target);
            }

            let over_cluster = is_over_active(&self.grid, bee.pos);

            if over_cluster
                && bee.mode() == Mode::Fly
                && !bee.is_locked()
                && self.rng.chance(c.land_bias_chance)
            {
                bee.enter_state(Mode::Land, None, &self.bee_params, &mut self.rng);
            }

            if bee.is_outside(self.width, self.height, c.edge_buffer_px) {
                bee.place_at_edge(self.width, self.height, c.edge_buffer_px * 0.5, &mut self.rng);
                continue;
            }

            // Staggered so each bee rolls once per second on its own frame.
            if (frame + i as u64) % fps != 0 || !bee.on_ground() || bee.is_locked() {
                continue;
            }
            let Some(target) = bee.target() else {
                continue;
            };
            let mut threshold = c.long_flight_distance * bee.size;
            let mut chance = c.long_flight_chance;
            if over_cluster {
                threshold *= c.long_flight_cluster_factor;
                chance *= c.long_flight_cluster_damp;
            }
            if bee.pos.distance(target.pos) > threshold && self.rng.chance(chance) {
                bee.enter_state(Mode::Takeoff, None, &self.bee_params, &mut self.rng);
            }
        }
    }

    fn collect_stats(&self, frame: u64, cap: usize, hits: usize) -> FrameStats {
        let mut stats = FrameStats {
            frame,
            active_clusters: self.pool.active_count(),
            active_cells: self.grid.active_count(),
            cluster_cap: cap,
            trail_len: self.trail.len(),
            proximity_hits: hits,
            ..FrameStats::default()
        };
        for bee in &self.bees {
            if bee.on_ground() {
                stats.bees_grounded += 1;
            } else {
                stats.bees_airborne += 1;
            }
            if let Some(i) = Mode::ALL.iter().position(|&m| m == bee.mode()) {
                stats.mode_counts[i] += 1;
            }
        }
        stats
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Whether `p` lies over an active cluster cell.
fn is_over_active(grid: &HexGrid, p: Vec2) -> bool {
    matches!(grid.nearest_cell_to(p), (Some(cell), _) if cell.active)
}

/// A fresh target: an active honey cell (by chance, when any shows) or a
/// random point inside the canvas.
fn pick_target(
    grid:        &HexGrid,
    honey_cells: &[Axial],
    width:       f32,
    height:      f32,
    params:      &BeeParams,
    rng:         &mut SimRng,
) -> Target {
    let max_age = params.sample_target_age(rng);
    if !honey_cells.is_empty() && rng.chance(params.cfg.honey_target_chance) {
        if let Some(cell) = rng.choose(honey_cells).and_then(|&a| grid.get(a)) {
            return Target::new(cell.pos(), Some(cell.axial), max_age);
        }
    }
    let pos = Vec2::new(rng.gen_range(0.0..=width.max(0.0)), rng.gen_range(0.0..=height.max(0.0)));
    Target::new(pos, None, max_age)
}

/// Canvas dimensions must be finite and positive.
pub(crate) fn check_canvas(width: f32, height: f32) -> HiveResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(HiveError::InvalidCanvas { width, height })
    }
}
