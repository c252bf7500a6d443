//! Fluent builder for constructing a [`Hive`].

use tracing::info;

use hv_bee::{Bee, BeeParams, FootprintParams, Wander};
use hv_cluster::{ClusterParams, ClusterPool, DynamicCap};
use hv_core::{BeeId, FrameClock, FrameRate, HiveConfig, HiveResult, SimRng};
use hv_grid::HexGrid;
use hv_spatial::{ProximityParams, ProximityResolver};

use crate::hive::check_canvas;
use crate::{FrameStats, Hive, TrailBuffer};

/// Fluent builder for [`Hive`].
///
/// # Required inputs
///
/// - [`HiveConfig`]: frame rate, seed, every tunable.
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `.canvas(w, h)`   | 800 × 600                                        |
/// | `.seed(s)`        | `config.seed`, else entropy                      |
/// | `.grid(g)`        | `HexGrid::covering(w, h, cell_radius)`           |
/// | `.bee_count(n)`   | `config.bee_count(w, h)`                         |
/// | `.bees(v)`        | `n` bees flying in from off-screen               |
///
/// # Example
///
/// ```rust
/// use hv_core::HiveConfig;
/// use hv_sim::{HiveBuilder, NoopObserver};
///
/// let mut hive = HiveBuilder::new(HiveConfig::default())
///     .canvas(320.0, 240.0)
///     .seed(42)
///     .build()
///     .unwrap();
/// hive.run_frames(10, &mut NoopObserver);
/// assert_eq!(hive.frame().0, 10);
/// ```
pub struct HiveBuilder {
    config:    HiveConfig,
    width:     f32,
    height:    f32,
    seed:      Option<u64>,
    grid:      Option<HexGrid>,
    bee_count: Option<usize>,
    bees:      Option<Vec<Bee>>,
}

impl HiveBuilder {
    pub fn new(config: HiveConfig) -> Self {
        Self {
            config,
            width:     800.0,
            height:    600.0,
            seed:      None,
            grid:      None,
            bee_count: None,
            bees:      None,
        }
    }

    /// Canvas size in device-independent pixels.
    pub fn canvas(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Pin the RNG seed, overriding `config.seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a hand-built grid instead of one covering the canvas.
    pub fn grid(mut self, grid: HexGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Override the density-derived population.  Clamped to at least 1.
    pub fn bee_count(mut self, n: usize) -> Self {
        self.bee_count = Some(n);
        self
    }

    /// Supply the bees directly; `bee_count` is then ignored.
    pub fn bees(mut self, bees: Vec<Bee>) -> Self {
        self.bees = Some(bees);
        self
    }

    /// Validate and clamp the configuration, lay out the grid, spawn the
    /// bees and return a ready-to-run [`Hive`].
    pub fn build(self) -> HiveResult<Hive> {
        self.config.validate()?;
        check_canvas(self.width, self.height)?;

        let config = self.config.sanitized();
        let rate = FrameRate::new(config.fps);
        let mut rng = SimRng::from_optional_seed(self.seed.or(config.seed));

        let grid = self
            .grid
            .unwrap_or_else(|| HexGrid::covering(self.width, self.height, config.grid.cell_radius));

        let bee_params = BeeParams::new(config.bees.clone(), rate);
        let bees = match self.bees {
            Some(bees) => bees,
            None => {
                let n = self
                    .bee_count
                    .map_or_else(|| config.bee_count(self.width, self.height), |n| n.max(1));
                let buffer = bee_params.cfg.edge_buffer_px.max(0.0);
                (0..n)
                    .map(|i| {
                        let stagger = rng.gen_range(0.0..=buffer);
                        Bee::spawn_offscreen(
                            BeeId(i as u32),
                            self.width,
                            self.height,
                            stagger,
                            &bee_params,
                            &mut rng,
                        )
                    })
                    .collect()
            }
        };

        let pool = ClusterPool::new(
            ClusterParams::from_config(&config.clusters, rate),
            config.clusters.pool_size,
        );
        let proximity = ProximityResolver::new(ProximityParams::from_config(
            &config.proximity,
            config.bees.size,
            rate,
        ));
        let wander = Wander::new(rng.random::<u32>(), config.bees.noise_rate);

        info!(
            width = self.width,
            height = self.height,
            cells = grid.len(),
            bees = bees.len(),
            fps = rate.fps(),
            "hive built"
        );

        Ok(Hive {
            clock:           FrameClock::new(rate),
            width:           self.width,
            height:          self.height,
            cap:             DynamicCap::from_config(&config.clusters, rate),
            prints:          FootprintParams::from_config(&config.trail, rate),
            trail:           TrailBuffer::new(config.trail.max_entries),
            spawn_stagger:   rate.frames(config.clusters.spawn_stagger_secs) as u64,
            honey_cells:     Vec::new(),
            last_auto_spawn: None,
            last_stats:      FrameStats::default(),
            grid,
            pool,
            bees,
            bee_params,
            wander,
            proximity,
            rng,
            config,
        })
    }
}
