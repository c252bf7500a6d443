use hv_bee::Mode;

/// Snapshot taken at the end of every frame.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameStats {
    pub frame:           u64,
    pub active_clusters: usize,
    pub active_cells:    usize,
    /// Effective dynamic cluster cap for this frame.
    pub cluster_cap:     usize,
    pub trail_len:       usize,
    pub bees_grounded:   usize,
    pub bees_airborne:   usize,
    /// Bees per [`Mode`], indexed like [`Mode::ALL`].
    pub mode_counts:     [usize; 9],
    /// Bees that reacted to a neighbour in this frame's proximity pass.
    pub proximity_hits:  usize,
}

impl FrameStats {
    pub fn mode_count(&self, mode: Mode) -> usize {
        Mode::ALL
            .iter()
            .position(|&m| m == mode)
            .map_or(0, |i| self.mode_counts[i])
    }

    pub fn bee_count(&self) -> usize {
        self.bees_grounded + self.bees_airborne
    }
}
