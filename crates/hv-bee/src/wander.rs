use std::fmt;

use noise::{NoiseFn, Simplex};

/// Smooth heading drift shared by every bee.
///
/// Each bee samples the same field along its own row (`noise_seed`), moving
/// along the frame axis, so neighbouring frames give neighbouring values and
/// two bees never wobble in step.
#[derive(Clone)]
pub struct Wander {
    field: Simplex,
    seed:  u32,
    rate:  f64,
}

impl Wander {
    pub fn new(seed: u32, rate: f32) -> Self {
        Self { field: Simplex::new(seed), seed, rate: rate as f64 }
    }

    /// Noise in roughly `[-1, 1]` for `noise_seed` at `frame`.
    #[inline]
    pub fn sample(&self, noise_seed: f64, frame: u64) -> f32 {
        self.field.get([noise_seed, frame as f64 * self.rate]) as f32
    }
}

impl fmt::Debug for Wander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wander").field("seed", &self.seed).field("rate", &self.rate).finish()
    }
}
