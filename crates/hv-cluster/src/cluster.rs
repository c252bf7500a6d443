//! A single cluster: the cells it owns and where it is in its lifecycle.

use hv_core::{ClusterConfig, ClusterId, ContentWeights, FrameRate, SimRng};
use hv_grid::{Axial, HexGrid};

use crate::growth;
use crate::{CellPhase, ClusterError, ClusterResult, ClusterTiming};

/// Cluster tunables resolved to frames.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterParams {
    pub target_size:            usize,
    pub visible_frames:         u32,
    pub visible_jitter:         f32,
    pub fade_in_frames:         u32,
    pub fade_out_frames:        u32,
    pub ring_delay_frames:      u32,
    pub cooldown_frames:        u32,
    pub outline_rings:          u8,
    pub border_opacity_divisor: f32,
    pub min_growth_probability: f32,
    pub growth_falloff:         f32,
    pub content:                ContentWeights,
}

impl ClusterParams {
    pub fn from_config(cfg: &ClusterConfig, rate: FrameRate) -> Self {
        Self {
            target_size:            cfg.target_size.max(1),
            visible_frames:         rate.frames(cfg.visible_secs),
            visible_jitter:         cfg.visible_jitter,
            fade_in_frames:         rate.frames(cfg.fade_in_secs),
            fade_out_frames:        rate.frames(cfg.fade_out_secs),
            ring_delay_frames:      rate.frames(cfg.ring_delay_secs),
            cooldown_frames:        rate.frames(cfg.cooldown_secs),
            outline_rings:          cfg.outline_rings,
            border_opacity_divisor: cfg.border_opacity_divisor.max(1.0),
            min_growth_probability: cfg.min_growth_probability,
            growth_falloff:         cfg.growth_falloff,
            content:                cfg.content.clone(),
        }
    }
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self::from_config(&ClusterConfig::default(), FrameRate::default())
    }
}

/// Outcome of advancing an active cluster by one frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClusterStep {
    /// Still running; `released` cells finished their fade this frame.
    Running { released: usize },
    /// Lifetime exceeded; every remaining cell was reset and the cooldown
    /// started.
    Finished { released: usize },
}

/// A pooled group of cells animated together.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub id:                ClusterId,
    seed:                  Option<Axial>,
    cells:                 Vec<Axial>,
    timing:                ClusterTiming,
    max_ring_distance:     u32,
    frame_counter:         u32,
    active:                bool,
    cooldown:              u32,
    cooldown_on_finish:    u32,
    user_spawned:          bool,
    border_divisor:        f32,
}

impl Cluster {
    /// An inactive, immediately reusable slot.
    pub fn new(id: ClusterId) -> Self {
        Self {
            id,
            seed:               None,
            cells:              Vec::new(),
            timing:             ClusterTiming::default(),
            max_ring_distance:  0,
            frame_counter:      0,
            active:             false,
            cooldown:           0,
            cooldown_on_finish: 0,
            user_spawned:       false,
            border_divisor:     3.0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Inactive with the cooldown elapsed.
    #[inline]
    pub fn is_available(&self) -> bool {
        !self.active && self.cooldown == 0
    }

    pub fn seed(&self) -> Option<Axial> {
        self.seed
    }

    /// Cells currently owned.  Shrinks as cells finish fading out.
    pub fn cells(&self) -> &[Axial] {
        &self.cells
    }

    pub fn timing(&self) -> ClusterTiming {
        self.timing
    }

    pub fn max_ring_distance(&self) -> u32 {
        self.max_ring_distance
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn is_user_spawned(&self) -> bool {
        self.user_spawned
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Seed the cluster at `seed`: grow the region, fill holes, add outline
    /// rings, tag depths, distances and content, and derive the timing.
    ///
    /// Fails without touching the grid if the seed is missing or active, or
    /// if this slot is not available.  Returns the number of cells claimed.
    pub fn activate(
        &mut self,
        grid:   &mut HexGrid,
        seed:   Axial,
        params: &ClusterParams,
        user:   bool,
        rng:    &mut SimRng,
    ) -> ClusterResult<usize> {
        if !self.is_available() {
            return Err(ClusterError::PoolExhausted);
        }
        match grid.get(seed) {
            None => return Err(ClusterError::CellNotFound(seed)),
            Some(c) if c.active => return Err(ClusterError::CellAlreadyActive(seed)),
            Some(_) => {}
        }

        let mut cells = growth::grow(
            grid,
            seed,
            params.target_size,
            params.min_growth_probability,
            params.growth_falloff,
            rng,
        );
        growth::fill_holes(grid, &mut cells);
        for ring in 1..=params.outline_rings {
            growth::add_outline_ring(grid, &mut cells, ring);
        }
        growth::tag_edge_depths(grid, &cells);
        let max_ring = growth::assign_ring_distances(grid, &cells, seed);
        growth::assign_content(grid, &cells, seed, &params.content, rng);

        self.timing = ClusterTiming::derive(
            params.visible_frames,
            params.visible_jitter,
            params.fade_in_frames,
            params.fade_out_frames,
            params.ring_delay_frames,
            max_ring,
            rng,
        );
        self.seed = Some(seed);
        self.cells = cells;
        self.max_ring_distance = max_ring;
        self.frame_counter = 0;
        self.active = true;
        self.cooldown_on_finish = params.cooldown_frames;
        self.user_spawned = user;
        self.border_divisor = params.border_opacity_divisor;
        Ok(self.cells.len())
    }

    /// Advance one frame.  No-op for an inactive cluster.
    pub fn update(&mut self, grid: &mut HexGrid) -> ClusterStep {
        if !self.active {
            return ClusterStep::Running { released: 0 };
        }
        let released = self.update_cell_lifecycle(grid);

        self.frame_counter += 1;
        if self.frame_counter > self.timing.total {
            let rest = self.deactivate(grid);
            return ClusterStep::Finished { released: released + rest };
        }
        ClusterStep::Running { released }
    }

    /// Write every owned cell's opacity for the current frame counter.
    /// Cells that finish fading out are reset and dropped from the cluster.
    fn update_cell_lifecycle(&mut self, grid: &mut HexGrid) -> usize {
        let timing = self.timing;
        let counter = self.frame_counter;
        let divisor = self.border_divisor;
        let before = self.cells.len();

        self.cells.retain(|&a| {
            let Some(cell) = grid.get_mut(a) else {
                return false;
            };
            let ring = cell.ring_distance + cell.border_ring as u32;
            match timing.phase(counter, ring) {
                CellPhase::Done => {
                    cell.reset();
                    false
                }
                phase => {
                    let mut opacity = phase.opacity();
                    if cell.is_border() {
                        opacity /= divisor * cell.border_ring as f32;
                    }
                    cell.opacity = opacity;
                    cell.age += 1;
                    true
                }
            }
        });
        before - self.cells.len()
    }

    /// Release every remaining cell and start the cooldown.
    pub fn deactivate(&mut self, grid: &mut HexGrid) -> usize {
        let released = self.cells.len();
        for a in self.cells.drain(..) {
            if let Some(cell) = grid.get_mut(a) {
                cell.reset();
            }
        }
        self.active = false;
        self.cooldown = self.cooldown_on_finish;
        released
    }

    /// One frame off the reuse lockout.
    #[inline]
    pub fn tick_cooldown(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}
