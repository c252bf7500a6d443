//! Cluster timing and the per-cell opacity curve.
//!
//! Each cell starts its fade `ring_delay · (ring_distance + border_ring)`
//! frames after the cluster does, and its visible window is shortened by
//! twice that delay, so outer rings light up last and go dark first:
//!
//! ```text
//! relative = frame_counter − delay
//! window   = visible − 2·delay
//!
//!   relative < 0                      → pending, opacity 0
//!   0 ≤ relative ≤ fade_in            → ramp 0 → 1
//!   relative > fade_in + window       → ramp 1 → 0, done at ≤ 0
//!   otherwise                         → held at 1
//! ```

use hv_core::SimRng;

/// Frame counts fixed when a cluster is activated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ClusterTiming {
    pub fade_in:    u32,
    pub fade_out:   u32,
    /// Inflated visible window (see [`ClusterTiming::derive`]).
    pub visible:    u32,
    pub ring_delay: u32,
    /// `visible + fade_in + fade_out`.
    pub total:      u32,
}

impl ClusterTiming {
    /// Jitter `base_visible` by ±`jitter`, then inflate it by
    /// `fade_in + fade_out + ring_delay · max_ring` so the outermost ring
    /// still gets a full cycle.  The result is never shorter than
    /// `2 · ring_delay · max_ring`, which keeps every cell's own window
    /// non-negative.
    pub fn derive(
        base_visible: u32,
        jitter:       f32,
        fade_in:      u32,
        fade_out:     u32,
        ring_delay:   u32,
        max_ring:     u32,
        rng:          &mut SimRng,
    ) -> Self {
        let jittered = rng.jitter(base_visible as f32, jitter).round().max(0.0) as u32;
        Self::with_visible(jittered, fade_in, fade_out, ring_delay, max_ring)
    }

    /// [`derive`](Self::derive) without the random jitter.
    pub fn with_visible(
        visible:    u32,
        fade_in:    u32,
        fade_out:   u32,
        ring_delay: u32,
        max_ring:   u32,
    ) -> Self {
        let max_delay = ring_delay.saturating_mul(max_ring);
        let visible = visible
            .saturating_add(fade_in)
            .saturating_add(fade_out)
            .saturating_add(max_delay)
            .max(max_delay.saturating_mul(2));
        Self {
            fade_in,
            fade_out,
            visible,
            ring_delay,
            total: visible.saturating_add(fade_in).saturating_add(fade_out),
        }
    }

    /// Start delay for a cell `ring` steps out (ring distance + border ring).
    #[inline]
    pub fn cell_delay(&self, ring: u32) -> u32 {
        self.ring_delay.saturating_mul(ring)
    }

    /// Where a cell `ring` steps out is on its curve at `frame_counter`.
    pub fn phase(&self, frame_counter: u32, ring: u32) -> CellPhase {
        let delay = self.cell_delay(ring) as i64;
        let relative = frame_counter as i64 - delay;
        let fade_in = self.fade_in as i64;
        let window = (self.visible as i64 - 2 * delay).max(0);

        if relative < 0 {
            return CellPhase::Pending;
        }
        if relative <= fade_in {
            if fade_in == 0 {
                return CellPhase::Visible;
            }
            return CellPhase::FadingIn(relative as f32 / fade_in as f32);
        }
        if relative > fade_in + window {
            if self.fade_out == 0 {
                return CellPhase::Done;
            }
            let out = 1.0 - (relative - fade_in - window) as f32 / self.fade_out as f32;
            if out <= 0.0 {
                return CellPhase::Done;
            }
            return CellPhase::FadingOut(out);
        }
        CellPhase::Visible
    }
}

/// A cell's position on its opacity curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CellPhase {
    Pending,
    FadingIn(f32),
    Visible,
    FadingOut(f32),
    /// Faded out; the cell goes back to the pool of inactive cells.
    Done,
}

impl CellPhase {
    #[inline]
    pub fn opacity(self) -> f32 {
        match self {
            CellPhase::Pending | CellPhase::Done => 0.0,
            CellPhase::FadingIn(o) | CellPhase::FadingOut(o) => o.clamp(0.0, 1.0),
            CellPhase::Visible => 1.0,
        }
    }
}
