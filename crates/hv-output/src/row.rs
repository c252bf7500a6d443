//! Plain data row types written by output backends.

use hv_core::ClusterId;
use hv_grid::Axial;
use hv_sim::FrameStats;

/// One sampled frame.  Mode counts follow `hv_bee::Mode::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRow {
    pub frame:           u64,
    pub active_clusters: u32,
    pub active_cells:    u32,
    pub cluster_cap:     u32,
    pub trail_len:       u32,
    pub bees_grounded:   u32,
    pub bees_airborne:   u32,
    pub proximity_hits:  u32,
    pub mode_counts:     [u32; 9],
}

impl From<&FrameStats> for FrameRow {
    fn from(s: &FrameStats) -> Self {
        let narrow = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Self {
            frame:           s.frame,
            active_clusters: narrow(s.active_clusters),
            active_cells:    narrow(s.active_cells),
            cluster_cap:     narrow(s.cluster_cap),
            trail_len:       narrow(s.trail_len),
            bees_grounded:   narrow(s.bees_grounded),
            bees_airborne:   narrow(s.bees_airborne),
            proximity_hits:  narrow(s.proximity_hits),
            mode_counts:     s.mode_counts.map(narrow),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterEvent {
    Spawned,
    UserSpawned,
    Released,
}

impl ClusterEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ClusterEvent::Spawned => "spawned",
            ClusterEvent::UserSpawned => "user_spawned",
            ClusterEvent::Released => "released",
        }
    }
}

/// A cluster spawn or release, with the cell it was seeded at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterEventRow {
    pub frame:   u64,
    pub cluster: ClusterId,
    pub event:   ClusterEvent,
    pub seed:    Option<Axial>,
}
