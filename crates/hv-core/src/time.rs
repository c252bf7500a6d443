//! Frame-based time model.
//!
//! # Design
//!
//! All simulation logic counts logical frames, never wall-clock time.  A
//! frame is `1000 / fps` milliseconds of logical time.  Tunables are written
//! in seconds-equivalents and converted once with [`FrameRate::frames`].
//!
//! The host drives the engine with display callbacks that carry a
//! millisecond timestamp.  [`FixedStep`] turns those into a whole number of
//! logical frames per callback, carrying the remainder forward and clamping
//! large gaps (a backgrounded tab) so the catch-up loop cannot run away.

use std::fmt;

/// Largest wall-clock delta, in milliseconds, honoured by a single callback.
pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute logical frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// Return the frame `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Frame {
        Frame(self.0 + n)
    }

    /// Frames elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Frame) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameRate ─────────────────────────────────────────────────────────────────

/// Logical frames per second.  Always finite and positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameRate(f32);

impl FrameRate {
    pub const MIN_FPS: f32 = 1.0;
    pub const MAX_FPS: f32 = 240.0;

    /// Build a rate, clamping into `[MIN_FPS, MAX_FPS]`.  NaN falls back to 60.
    pub fn new(fps: f32) -> Self {
        if fps.is_nan() {
            return FrameRate(60.0);
        }
        FrameRate(fps.clamp(Self::MIN_FPS, Self::MAX_FPS))
    }

    #[inline]
    pub fn fps(self) -> f32 {
        self.0
    }

    /// Logical milliseconds per frame.
    #[inline]
    pub fn step_ms(self) -> f64 {
        1000.0 / self.0 as f64
    }

    /// Number of frames spanning `secs` seconds (rounded, never negative).
    #[inline]
    pub fn frames(self, secs: f32) -> u32 {
        (secs.max(0.0) * self.0).round() as u32
    }

    /// Seconds represented by `frames`.
    #[inline]
    pub fn secs(self, frames: u64) -> f32 {
        frames as f32 / self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(60.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Tracks the current logical frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
    pub rate: FrameRate,
    /// The current frame, advanced by [`FrameClock::advance`] once per tick.
    pub current: Frame,
}

impl FrameClock {
    pub fn new(rate: FrameRate) -> Self {
        Self { rate, current: Frame::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current = Frame(self.current.0 + 1);
    }

    /// Elapsed logical seconds since frame 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        self.rate.secs(self.current.0)
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current, self.elapsed_secs())
    }
}

// ── FixedStep ─────────────────────────────────────────────────────────────────

/// Fixed-timestep accumulator.
///
/// ```
/// use hv_core::{FixedStep, FrameRate};
///
/// let mut step = FixedStep::new(FrameRate::new(50.0)); // 20 ms frames
/// assert_eq!(step.push(1_000.0), 0);                    // first callback primes
/// assert_eq!(step.push(1_050.0), 2);                    // 50 ms → 2 frames, 10 ms carried
/// assert_eq!(step.push(1_060.0), 1);                    // 10 + 10 ms → 1 frame
/// ```
#[derive(Clone, Debug)]
pub struct FixedStep {
    step_ms:      f64,
    accumulated:  f64,
    last_ms:      Option<f64>,
}

impl FixedStep {
    pub fn new(rate: FrameRate) -> Self {
        Self { step_ms: rate.step_ms(), accumulated: 0.0, last_ms: None }
    }

    /// Feed a host timestamp (milliseconds) and return how many logical
    /// frames to run.  Deltas above [`MAX_FRAME_DELTA_MS`] are clamped and
    /// backwards or non-finite timestamps contribute nothing.
    pub fn push(&mut self, timestamp_ms: f64) -> u32 {
        if !timestamp_ms.is_finite() {
            return 0;
        }
        let Some(last) = self.last_ms.replace(timestamp_ms) else {
            return 0;
        };
        let delta = (timestamp_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS);
        self.accumulated += delta;

        let steps = (self.accumulated / self.step_ms).floor();
        self.accumulated -= steps * self.step_ms;
        steps as u32
    }

    /// Forget the last timestamp, e.g. after the host paused scheduling.
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulated = 0.0;
    }

    #[inline]
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}
