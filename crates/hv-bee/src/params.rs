//! Bee tunables resolved against the frame rate.

use hv_core::{BeeConfig, FrameRate, SimRng, Span};

use crate::Mode;

/// [`BeeConfig`] plus the frame rate it is played at.
///
/// Durations stay in seconds inside the config and are turned into frame
/// counts when sampled, so one `BeeParams` serves every bee.
#[derive(Clone, Debug, PartialEq)]
pub struct BeeParams {
    pub cfg:            BeeConfig,
    pub rate:           FrameRate,
    /// Proximity cooldown armed on entering flutter, takeoff, hover or land.
    pub entry_cooldown: u32,
}

impl BeeParams {
    pub fn new(cfg: BeeConfig, rate: FrameRate) -> Self {
        let entry_cooldown = rate.frames(cfg.entry_cooldown_secs);
        Self { cfg, rate, entry_cooldown }
    }

    /// Duration range of `mode`, or `None` for states that end on a
    /// condition rather than a timer.
    pub fn span_for(&self, mode: Mode) -> Option<Span> {
        let c = &self.cfg;
        match mode {
            Mode::Idle    => Some(c.idle_secs),
            Mode::Blocked => Some(c.blocked_secs),
            Mode::Walk    => Some(c.walk_secs),
            Mode::Turn    => Some(c.turn_secs),
            Mode::Flutter => Some(c.flutter_secs),
            Mode::Takeoff => Some(c.takeoff_secs),
            Mode::Fly     => Some(c.fly_secs),
            Mode::Hover   => Some(c.hover_secs),
            Mode::Land    => None,
        }
    }

    /// Random duration in frames for `mode`; 0 for untimed states.
    pub fn sample_duration(&self, mode: Mode, rng: &mut SimRng) -> u32 {
        match self.span_for(mode) {
            Some(span) => rng.frames_in(span, self.rate),
            None => 0,
        }
    }

    /// Frames a target stays valid before it is replaced.
    pub fn sample_target_age(&self, rng: &mut SimRng) -> u32 {
        rng.frames_in(self.cfg.retarget_secs, self.rate)
    }

    /// Radius in px of the click-scare effect.
    pub fn scare_radius(&self) -> f32 {
        (self.cfg.scare_radius * self.cfg.size).max(self.cfg.scare_min_radius_px)
    }

    /// Ground speed in px per frame.
    pub fn walk_speed(&self) -> f32 {
        self.cfg.walk_speed * self.cfg.size
    }

    /// Air speed in px per frame at height `z`.
    pub fn fly_speed(&self, z: f32) -> f32 {
        self.cfg.fly_speed * self.cfg.size * (1.0 + self.cfg.fly_speed_per_height * z.max(0.0))
    }
}

impl Default for BeeParams {
    fn default() -> Self {
        Self::new(BeeConfig::default(), FrameRate::default())
    }
}
