//! Dusty footprints left by bees walking over pollen or honey.

use hv_core::{FrameRate, TrailConfig, Vec2};
use hv_grid::ContentType;

use crate::Bee;

/// Which foot made the print.  Alternates step by step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FootSide {
    #[default]
    Left,
    Right,
}

impl FootSide {
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            FootSide::Left => FootSide::Right,
            FootSide::Right => FootSide::Left,
        }
    }
}

/// One trail entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Footprint {
    pub pos:     Vec2,
    pub heading: f32,
    pub kind:    ContentType,
    pub age:     u32,
    pub max_age: u32,
    pub side:    FootSide,
    pub scale:   f32,
}

impl Footprint {
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.age >= self.max_age
    }

    /// Fades linearly to 0 over the lifetime.
    pub fn opacity(&self) -> f32 {
        if self.max_age == 0 {
            return 0.0;
        }
        1.0 - (self.age as f32 / self.max_age as f32).min(1.0)
    }
}

/// [`TrailConfig`] resolved to frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FootprintParams {
    pub lifetime_frames: u32,
    pub step_frames:     u32,
    pub sticky_frames:   u32,
    pub scale:           f32,
}

impl FootprintParams {
    pub fn from_config(cfg: &TrailConfig, rate: FrameRate) -> Self {
        Self {
            lifetime_frames: rate.frames(cfg.lifetime_secs).max(1),
            step_frames:     cfg.step_frames.max(1),
            sticky_frames:   rate.frames(cfg.sticky_secs),
            scale:           cfg.scale,
        }
    }
}

impl Default for FootprintParams {
    fn default() -> Self {
        Self::from_config(&TrailConfig::default(), FrameRate::default())
    }
}

impl Bee {
    /// Update sticky feet from the content under the bee and emit a
    /// footprint if one is due.
    ///
    /// Standing on a dusty cell recharges the feet; elsewhere they dry off
    /// over `sticky_frames`.  A print is left only while grounded and
    /// moving, at most once per `step_frames`, on alternating sides.
    pub fn footprint(
        &mut self,
        under:  Option<ContentType>,
        params: &FootprintParams,
    ) -> Option<Footprint> {
        match under {
            Some(kind) if kind.is_dusty() => {
                self.sticky_kind = Some(kind);
                self.sticky_age = params.sticky_frames.max(1);
            }
            _ => {
                self.sticky_age = self.sticky_age.saturating_sub(1);
                if self.sticky_age == 0 {
                    self.sticky_kind = None;
                }
            }
        }

        if !self.on_ground || !self.ground_motion {
            return None;
        }
        self.step_frames = self.step_frames.saturating_add(1);
        let kind = self.sticky_kind?;
        if self.step_frames < params.step_frames {
            return None;
        }
        self.step_frames = 0;

        let side = self.foot;
        self.foot = side.flip();
        let pos = self.pos.offset(self.side_angle(side), self.size * 0.15);
        Some(Footprint {
            pos,
            heading: self.heading,
            kind,
            age: 0,
            max_age: params.lifetime_frames,
            side,
            scale: params.scale * self.size,
        })
    }
}
