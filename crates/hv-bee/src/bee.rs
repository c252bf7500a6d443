//! The `Bee` agent: state, transitions and externally driven events.

use std::f32::consts::{FRAC_PI_2, PI};

use tracing::trace;

use hv_core::{BeeId, SimRng, Vec2, wrap_angle};
use hv_grid::ContentType;

use crate::{BeeParams, FootSide, Mode, Target};

/// Below this height a bee counts as standing on the ground.
pub const ON_GROUND_HEIGHT: f32 = 0.3;

/// Orbit parameters snapshotted when a bee enters `hover`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HoverOrbit {
    pub anchor:    Vec2,
    pub radius:    f32,
    /// `1.0` counter-clockwise, `-1.0` clockwise.
    pub direction: f32,
    pub phase:     f32,
}

/// A single bee.
///
/// Bees are created once and never destroyed; leaving the canvas only moves
/// them back to an edge.
#[derive(Clone, Debug)]
pub struct Bee {
    pub id:      BeeId,
    pub pos:     Vec2,
    /// Height: 0 on the ground, 1 and 2 are the flight layers.
    pub z:       f32,
    pub heading: f32,
    pub size:    f32,

    pub(crate) mode:           Mode,
    pub(crate) state_counter:  u32,
    /// 0 until the state's first frame picks one (untimed states keep 0).
    pub(crate) state_duration: u32,
    /// Other subsystems may not change the state while this is non-zero.
    pub(crate) dwell:          u32,
    /// Proximity checks are skipped while this is non-zero.
    pub(crate) cooldown:       u32,

    pub(crate) target:         Option<Target>,
    pub(crate) arrived_frames: u32,

    pub(crate) noise_seed: f64,
    pub(crate) hover:      HoverOrbit,

    pub(crate) on_ground:     bool,
    pub(crate) ground_motion: bool,

    pub(crate) sticky_age:  u32,
    pub(crate) sticky_kind: Option<ContentType>,
    pub(crate) foot:        FootSide,
    pub(crate) step_frames: u32,
}

impl Bee {
    /// A grounded, idle bee at `pos`.
    pub fn new(id: BeeId, pos: Vec2, heading: f32, size: f32, noise_seed: f64) -> Self {
        Self {
            id,
            pos,
            z: 0.0,
            heading: wrap_angle(heading),
            size,
            mode:           Mode::Idle,
            state_counter:  0,
            state_duration: 0,
            dwell:          0,
            cooldown:       0,
            target:         None,
            arrived_frames: 0,
            noise_seed,
            hover:          HoverOrbit::default(),
            on_ground:      true,
            ground_motion:  false,
            sticky_age:     0,
            sticky_kind:    None,
            foot:           FootSide::Left,
            step_frames:    0,
        }
    }

    /// A bee flying in from just outside a random canvas edge, aimed at the
    /// centre.  `stagger` (px) pushes the start point further out so a batch
    /// of bees arrives over time rather than all at once.
    pub fn spawn_offscreen(
        id:      BeeId,
        width:   f32,
        height:  f32,
        stagger: f32,
        params:  &BeeParams,
        rng:     &mut SimRng,
    ) -> Self {
        let noise_seed = rng.gen_range(0.0..10_000.0);
        let mut bee = Self::new(id, Vec2::ZERO, 0.0, params.cfg.size, noise_seed);
        bee.place_at_edge(width, height, stagger, rng);
        bee.z = 1.0;
        bee.on_ground = false;
        bee.mode = Mode::Fly;
        bee.state_duration = params.sample_duration(Mode::Fly, rng);
        bee
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state_counter(&self) -> u32 {
        self.state_counter
    }

    pub fn state_duration(&self) -> u32 {
        self.state_duration
    }

    pub fn dwell(&self) -> u32 {
        self.dwell
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Grounded and moved or turned this frame; legs animate exactly then.
    #[inline]
    pub fn ground_motion(&self) -> bool {
        self.ground_motion
    }

    pub fn hover_orbit(&self) -> HoverOrbit {
        self.hover
    }

    /// Content picked up by the feet, while it lasts.
    pub fn sticky_kind(&self) -> Option<ContentType> {
        self.sticky_kind
    }

    /// Discrete height band: 0 ground, 1 or 2 airborne.
    #[inline]
    pub fn layer(&self) -> u8 {
        self.z.clamp(0.0, 2.0).round() as u8
    }

    /// Dwell lock, proximity cooldown or a transitional state.
    pub fn is_locked(&self) -> bool {
        self.dwell > 0 || self.cooldown > 0 || self.mode.is_protected()
    }

    // ── Target ────────────────────────────────────────────────────────────

    #[inline]
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn arrived_frames(&self) -> u32 {
        self.arrived_frames
    }

    pub fn set_target(&mut self, target: Target) {
        self.target = Some(target);
        self.arrived_frames = 0;
    }

    pub fn clear_target(&mut self) {
        self.target = None;
        self.arrived_frames = 0;
    }

    /// No target, a stale one, or loitering at it too long.
    pub fn needs_target(&self, params: &BeeParams) -> bool {
        match &self.target {
            None => true,
            Some(t) => t.is_stale() || self.arrived_frames > params.cfg.max_arrived_frames,
        }
    }

    // ── State ─────────────────────────────────────────────────────────────

    /// Switch to `next`.
    ///
    /// Re-entering the current state only refreshes the duration (when one
    /// is given) and leaves the counter running.  A real change resets the
    /// counter, sets the duration (0 = pick on the first frame), arms the
    /// proximity cooldown for flutter, takeoff, hover and land, and
    /// snapshots the orbit when entering hover.
    pub fn enter_state(
        &mut self,
        next:     Mode,
        duration: Option<u32>,
        params:   &BeeParams,
        rng:      &mut SimRng,
    ) {
        if next == self.mode {
            if let Some(d) = duration {
                self.state_duration = d;
            }
            return;
        }
        trace!(bee = %self.id, from = %self.mode, to = %next, "state change");

        self.mode = next;
        self.state_counter = 0;
        self.state_duration = duration.unwrap_or(0);
        if next.arms_cooldown() {
            self.cooldown = self.cooldown.max(params.entry_cooldown);
        }
        if next == Mode::Hover {
            self.hover = HoverOrbit {
                anchor:    self.pos,
                radius:    params.cfg.hover_radius * self.size * self.z.max(0.5),
                direction: rng.sign(),
                phase:     rng.angle(),
            };
        }
    }

    /// Lock the current state for `dwell` frames and skip proximity checks
    /// for `cooldown` frames.  Never shortens an existing lock.
    pub fn lock(&mut self, dwell: u32, cooldown: u32) {
        self.dwell = self.dwell.max(dwell);
        self.cooldown = self.cooldown.max(cooldown);
    }

    /// Count the dwell lock and proximity cooldown down by one frame.
    #[inline]
    pub fn tick_counters(&mut self) {
        self.dwell = self.dwell.saturating_sub(1);
        self.cooldown = self.cooldown.saturating_sub(1);
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Flee from `from`: face away (with jitter), aim at a point a random
    /// flee distance along that heading, and take off for a few frames.
    /// A bee already flying stays in `fly` with only a few frames left.
    pub fn scare(&mut self, from: Vec2, params: &BeeParams, rng: &mut SimRng) {
        let away = if self.pos.distance_sq(from) > f32::EPSILON {
            from.bearing_to(self.pos)
        } else {
            rng.angle()
        };
        let jitter = params.cfg.scare_jitter.abs();
        self.heading = wrap_angle(away + rng.gen_range(-jitter..=jitter));

        let dist = rng.in_span(params.cfg.flee_distance);
        let max_age = params.sample_target_age(rng);
        self.set_target(Target::new(self.pos.offset(self.heading, dist), None, max_age));

        let frames = params.cfg.scare_takeoff_frames.max(1);
        if self.mode == Mode::Fly {
            let mut cut = self.state_counter.saturating_add(frames);
            if self.state_duration > 0 {
                cut = cut.min(self.state_duration);
            }
            self.enter_state(Mode::Fly, Some(cut), params, rng);
            return;
        }
        self.enter_state(Mode::Takeoff, Some(frames), params, rng);
        self.dwell = 0;
    }

    /// Outside the canvas by more than `buffer` px.
    pub fn is_outside(&self, width: f32, height: f32, buffer: f32) -> bool {
        self.pos.x < -buffer
            || self.pos.y < -buffer
            || self.pos.x > width + buffer
            || self.pos.y > height + buffer
    }

    /// Move to a random point `outset` px beyond a random edge, heading
    /// roughly at the canvas centre.  Mode and height are untouched.
    pub fn place_at_edge(&mut self, width: f32, height: f32, outset: f32, rng: &mut SimRng) {
        let w = width.max(1.0);
        let h = height.max(1.0);
        self.pos = match rng.gen_range(0..4u8) {
            0 => Vec2::new(rng.gen_range(0.0..=w), -outset),
            1 => Vec2::new(w + outset, rng.gen_range(0.0..=h)),
            2 => Vec2::new(rng.gen_range(0.0..=w), h + outset),
            _ => Vec2::new(-outset, rng.gen_range(0.0..=h)),
        };
        let centre = Vec2::new(w * 0.5, h * 0.5);
        let spread = PI / 8.0;
        self.heading = wrap_angle(self.pos.bearing_to(centre) + rng.gen_range(-spread..=spread));
        self.clear_target();
    }

    /// Quarter-turn offset used to place a foot to one side of the body.
    #[inline]
    pub(crate) fn side_angle(&self, side: FootSide) -> f32 {
        match side {
            FootSide::Left => self.heading - FRAC_PI_2,
            FootSide::Right => self.heading + FRAC_PI_2,
        }
    }
}
