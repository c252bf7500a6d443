//! Host-callback adapter: wall-clock timestamps in, whole logical frames out.

use hv_core::{FixedStep, FrameRate};

use crate::{Canvas, Hive, HiveObserver};

/// Turns the host's per-display-frame callback into fixed-step hive frames.
///
/// Each callback advances the hive as many logical frames as the elapsed
/// time allows (deltas clamped to 100 ms) and then renders once.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    step: FixedStep,
}

impl FrameDriver {
    pub fn new(rate: FrameRate) -> Self {
        Self { step: FixedStep::new(rate) }
    }

    /// Driver matching `hive`'s frame rate.
    pub fn for_hive(hive: &Hive) -> Self {
        Self::new(hive.rate())
    }

    /// Handle one host callback at `timestamp_ms`.  Returns the number of
    /// logical frames run.
    pub fn on_animation_frame<O: HiveObserver>(
        &mut self,
        hive:         &mut Hive,
        timestamp_ms: f64,
        canvas:       Option<&mut dyn Canvas>,
        observer:     &mut O,
    ) -> u32 {
        let frames = self.step.push(timestamp_ms);
        for _ in 0..frames {
            hive.advance(observer);
        }
        hive.render(canvas);
        frames
    }

    /// Forget the last timestamp, e.g. when the host resumes after a pause.
    pub fn reset(&mut self) {
        self.step.reset();
    }
}
