//! Fixed set of reusable cluster slots.

use tracing::debug;

use hv_core::{ClusterId, SimRng};
use hv_grid::{Axial, HexGrid};

use crate::{Cluster, ClusterError, ClusterParams, ClusterResult, ClusterStep};

/// Owns every cluster slot.  Slots are never freed; an inactive slot whose
/// cooldown has reached zero is reseeded by the next spawn.
#[derive(Clone, Debug)]
pub struct ClusterPool {
    params:        ClusterParams,
    slots:         Vec<Cluster>,
    auto_spawned:  u64,
    user_spawned:  u64,
    finished:      u64,
}

impl ClusterPool {
    pub fn new(params: ClusterParams, size: usize) -> Self {
        let slots = (0..size.max(1))
            .map(|i| Cluster::new(ClusterId(i as u32)))
            .collect();
        Self { params, slots, auto_spawned: 0, user_spawned: 0, finished: 0 }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.slots.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.slots.iter()
    }

    pub fn active(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.slots.iter().filter(|c| c.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Cells held by active clusters.
    pub fn active_cell_count(&self) -> usize {
        self.active().map(|c| c.cells().len()).sum()
    }

    /// Mean cell count over active clusters, `None` when none are active.
    pub fn average_active_size(&self) -> Option<f32> {
        let n = self.active_count();
        if n == 0 {
            return None;
        }
        Some(self.active_cell_count() as f32 / n as f32)
    }

    /// `(automatic, user)` activations since construction or the last reset.
    pub fn spawn_counts(&self) -> (u64, u64) {
        (self.auto_spawned, self.user_spawned)
    }

    /// Clusters that ran to completion.
    pub fn finished_count(&self) -> u64 {
        self.finished
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Seed the first available slot at `seed`.
    pub fn spawn(
        &mut self,
        grid: &mut HexGrid,
        seed: Axial,
        user: bool,
        rng:  &mut SimRng,
    ) -> ClusterResult<ClusterId> {
        let slot = self
            .slots
            .iter_mut()
            .find(|c| c.is_available())
            .ok_or(ClusterError::PoolExhausted)?;
        let size = slot.activate(grid, seed, &self.params, user, rng)?;
        let id = slot.id;
        let timing = slot.timing();

        if user {
            self.user_spawned += 1;
        } else {
            self.auto_spawned += 1;
        }
        debug!(
            cluster = %id,
            seed = %seed,
            cells = size,
            total_frames = timing.total,
            user,
            "cluster spawned"
        );
        Ok(id)
    }

    /// [`spawn`](Self::spawn), refused once `cap` clusters are active.
    pub fn try_spawn(
        &mut self,
        grid: &mut HexGrid,
        seed: Axial,
        user: bool,
        cap:  usize,
        rng:  &mut SimRng,
    ) -> ClusterResult<ClusterId> {
        if self.active_count() >= cap {
            return Err(ClusterError::CapReached { cap });
        }
        self.spawn(grid, seed, user, rng)
    }

    // ── Per-frame ─────────────────────────────────────────────────────────

    /// Advance every slot one frame: cooldowns tick everywhere, active
    /// clusters update their cells.  Returns the clusters that finished.
    pub fn update(&mut self, grid: &mut HexGrid) -> Vec<ClusterId> {
        let mut done = Vec::new();
        for cluster in &mut self.slots {
            cluster.tick_cooldown();
            if !cluster.is_active() {
                continue;
            }
            if let ClusterStep::Finished { released } = cluster.update(grid) {
                debug!(cluster = %cluster.id, released, "cluster released");
                done.push(cluster.id);
            }
        }
        self.finished += done.len() as u64;
        done
    }

    /// Drop every slot back to its initial state.  Does not touch the grid;
    /// callers reset or rebuild it themselves.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = Cluster::new(slot.id);
        }
        self.auto_spawned = 0;
        self.user_spawned = 0;
        self.finished = 0;
    }
}
