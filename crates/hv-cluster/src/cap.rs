//! How many clusters may be active at once.
//!
//! Two limits combine:
//!
//! * **coverage**: `floor(target_coverage · grid_cells / avg_cluster_size)`,
//!   clamped to `max_clusters`.  Bounds steady-state density.
//! * **ramp**: 0 before `ramp_start`, then one more slot every `ramp_step`
//!   frames.  Bounds how fast the hive fills up after start.
//!
//! The effective cap is the smaller of the two.

use hv_core::{ClusterConfig, FrameRate};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DynamicCap {
    pub target_coverage: f32,
    pub max_clusters:    usize,
    pub ramp_start:      u64,
    pub ramp_step:       u64,
    /// Divisor used while no cluster is active to average over.
    pub fallback_size:   f32,
}

impl DynamicCap {
    pub fn from_config(cfg: &ClusterConfig, rate: FrameRate) -> Self {
        Self {
            target_coverage: cfg.target_coverage,
            max_clusters:    cfg.max_clusters,
            ramp_start:      rate.frames(cfg.ramp_start_secs) as u64,
            ramp_step:       rate.frames(cfg.ramp_step_secs).max(1) as u64,
            fallback_size:   cfg.target_size.max(1) as f32,
        }
    }

    pub fn coverage_cap(&self, total_cells: usize, avg_size: Option<f32>) -> usize {
        let avg = match avg_size {
            Some(a) if a.is_finite() && a >= 1.0 => a,
            _ => self.fallback_size.max(1.0),
        };
        let raw = (self.target_coverage.max(0.0) * total_cells as f32 / avg).floor();
        if !raw.is_finite() {
            return 0;
        }
        (raw as usize).min(self.max_clusters)
    }

    pub fn ramp_cap(&self, frame: u64) -> usize {
        if frame < self.ramp_start {
            return 0;
        }
        let slots = 1 + (frame - self.ramp_start) / self.ramp_step.max(1);
        (slots.min(self.max_clusters as u64)) as usize
    }

    pub fn effective(&self, frame: u64, total_cells: usize, avg_size: Option<f32>) -> usize {
        self.coverage_cap(total_cells, avg_size).min(self.ramp_cap(frame))
    }
}
