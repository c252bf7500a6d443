//! Simulation RNG wrapper.
//!
//! The hive is single-threaded and owns exactly one `SimRng`; every random
//! decision draws from it.
//! Seeding is optional: headless runs and tests pass a fixed seed so they are
//! repeatable, the interactive host lets it seed from OS entropy.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{FrameRate, Span};

/// Simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// `new(seed)` when a seed is given, otherwise `from_entropy()`.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => Self::from_entropy(),
        }
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// `f32` flavour of [`gen_bool`](Self::gen_bool); NaN counts as 0.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        if p.is_nan() {
            return false;
        }
        self.gen_bool(p as f64)
    }

    /// Uniform sample in `[span.min, span.max]`.  A degenerate span returns
    /// its single value.
    #[inline]
    pub fn in_span(&mut self, span: Span) -> f32 {
        if span.max <= span.min {
            return span.min;
        }
        self.0.gen_range(span.min..=span.max)
    }

    /// Random frame count for a span given in seconds.  Never zero.
    #[inline]
    pub fn frames_in(&mut self, span: Span, rate: FrameRate) -> u32 {
        rate.frames(self.in_span(span)).max(1)
    }

    /// `base` scaled by a uniform factor in `[1 - frac, 1 + frac]`.
    #[inline]
    pub fn jitter(&mut self, base: f32, frac: f32) -> f32 {
        let frac = frac.abs();
        if frac == 0.0 {
            return base;
        }
        base * self.0.gen_range(1.0 - frac..=1.0 + frac)
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f32 {
        self.0.gen_range(0.0..std::f32::consts::TAU)
    }

    /// `1.0` or `-1.0` with equal probability.
    #[inline]
    pub fn sign(&mut self) -> f32 {
        if self.0.r#gen::<bool>() { 1.0 } else { -1.0 }
    }

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
