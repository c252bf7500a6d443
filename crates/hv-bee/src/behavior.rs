//! Per-frame motion: steering, state dispatch and ground bookkeeping.

use hv_core::{SimRng, angle_diff, wrap_angle};

use crate::bee::ON_GROUND_HEIGHT;
use crate::{Bee, BeeParams, Mode, Wander};

/// Movement below this many px per frame does not count as ground motion.
const MOTION_EPSILON: f32 = 0.05;

/// Read-only state shared by every bee during one frame.
#[derive(Copy, Clone, Debug)]
pub struct StepContext<'a> {
    /// Global frame number.
    pub frame:  u64,
    pub params: &'a BeeParams,
    pub wander: &'a Wander,
}

impl<'a> StepContext<'a> {
    #[inline]
    pub fn new(frame: u64, params: &'a BeeParams, wander: &'a Wander) -> Self {
        Self { frame, params, wander }
    }
}

impl Bee {
    /// Advance one frame: steer, run the current state, derive
    /// `on_ground` and `ground_motion`.
    ///
    /// Counters are not touched here; the caller runs
    /// [`tick_counters`](Bee::tick_counters) earlier in the frame.
    pub fn step(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        let start_pos = self.pos;
        let start_heading = self.heading;

        self.steer(ctx.params);
        if self.mode.is_grounded() {
            self.z = 0.0;
        }

        match self.mode {
            Mode::Idle    => self.idle(ctx, rng),
            Mode::Blocked => self.blocked(ctx, rng),
            Mode::Walk    => self.walk(ctx, rng),
            Mode::Turn    => self.turn(ctx, rng),
            Mode::Flutter => self.flutter(ctx, rng),
            Mode::Takeoff => self.takeoff(ctx, rng),
            Mode::Fly     => self.fly(ctx, rng),
            Mode::Land    => self.land(ctx),
            Mode::Hover   => self.hover(ctx, rng),
        }

        self.heading = wrap_angle(self.heading);
        self.on_ground = self.z < ON_GROUND_HEIGHT;
        let moved = self.pos.distance(start_pos);
        let turned = self.heading != start_heading;
        self.ground_motion = self.on_ground && (moved > MOTION_EPSILON || turned);
    }

    // ── Steering ──────────────────────────────────────────────────────────

    /// Blend the heading toward the target and update arrival bookkeeping.
    fn steer(&mut self, params: &BeeParams) {
        let Some(target) = self.target.as_mut() else {
            return;
        };
        target.age = target.age.saturating_add(1);
        let target_pos = target.pos;

        let c = &params.cfg;
        let gain = match self.mode {
            Mode::Idle | Mode::Blocked => 0.0,
            Mode::Walk => c.steer_gain_walk,
            Mode::Fly => c.steer_gain_fly,
            _ => c.steer_gain_other,
        };
        if gain > 0.0 {
            let bearing = self.pos.bearing_to(target_pos);
            self.heading += angle_diff(self.heading, bearing) * gain;
        }

        if self.pos.distance(target_pos) <= c.arrive_radius * self.size {
            self.arrived_frames = self.arrived_frames.saturating_add(1);
        } else {
            self.arrived_frames = self.arrived_frames.saturating_sub(1);
        }
    }

    // ── Timer helpers ─────────────────────────────────────────────────────

    /// Count one frame in the current state, picking its duration on the
    /// first frame.  Returns `true` once the duration has elapsed.
    fn tick_state(&mut self, params: &BeeParams, rng: &mut SimRng) -> bool {
        if self.state_duration == 0 {
            self.state_duration = params.sample_duration(self.mode, rng);
        }
        self.state_counter = self.state_counter.saturating_add(1);
        self.state_duration > 0 && self.state_counter >= self.state_duration
    }

    #[inline]
    fn drift(&self, ctx: &StepContext<'_>) -> f32 {
        ctx.wander.sample(self.noise_seed, ctx.frame)
    }

    #[inline]
    fn advance(&mut self, speed: f32) {
        self.pos = self.pos.offset(self.heading, speed);
    }

    /// Ease height toward the nearer flight layer.
    fn pull_to_layer(&mut self, params: &BeeParams) {
        let layer = if self.z < 1.5 { 1.0 } else { 2.0 };
        self.z += (layer - self.z) * params.cfg.layer_pull;
    }

    // ── States ────────────────────────────────────────────────────────────

    fn idle(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        if !self.tick_state(ctx.params, rng) {
            return;
        }
        let c = &ctx.params.cfg;
        let roll: f32 = rng.random();
        let next = if roll < c.idle_to_walk {
            Mode::Walk
        } else if roll < c.idle_to_walk + c.idle_to_flutter {
            Mode::Flutter
        } else {
            Mode::Turn
        };
        self.enter_state(next, None, ctx.params, rng);
    }

    fn blocked(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        if !self.tick_state(ctx.params, rng) {
            return;
        }
        let next = if rng.chance(ctx.params.cfg.blocked_to_takeoff) {
            Mode::Takeoff
        } else {
            Mode::Turn
        };
        self.enter_state(next, None, ctx.params, rng);
    }

    fn walk(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        let c = &ctx.params.cfg;
        self.heading += self.drift(ctx) * c.walk_wander;
        self.advance(ctx.params.walk_speed());

        if rng.chance(c.walk_idle_chance) {
            self.enter_state(Mode::Idle, None, ctx.params, rng);
            return;
        }
        if !self.tick_state(ctx.params, rng) {
            return;
        }
        let next = match weighted_index(&c.walk_exit_weights, rng.random()) {
            0 => Mode::Turn,
            1 => Mode::Takeoff,
            2 => Mode::Flutter,
            _ => Mode::Idle,
        };
        self.enter_state(next, None, ctx.params, rng);
    }

    fn turn(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        let c = &ctx.params.cfg;
        let rate = if self.z < ON_GROUND_HEIGHT { c.turn_rate } else { c.turn_rate * c.air_turn_factor };
        let drift = self.drift(ctx);
        // Never stall: keep a minimum rotation in the drift's direction.
        let dir = if drift < 0.0 { -1.0 } else { 1.0 };
        self.heading += dir * rate * drift.abs().max(0.25);
        if self.tick_state(ctx.params, rng) {
            self.enter_state(Mode::Walk, None, ctx.params, rng);
        }
    }

    fn flutter(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        if self.tick_state(ctx.params, rng) {
            self.enter_state(Mode::Walk, None, ctx.params, rng);
        }
    }

    fn takeoff(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        let c = &ctx.params.cfg;
        self.z = (self.z + c.takeoff_rate).min(c.takeoff_ceiling);
        self.heading += self.drift(ctx) * c.walk_wander * 0.5;
        self.advance(ctx.params.fly_speed(self.z) * self.z.min(1.0));

        let expired = self.tick_state(ctx.params, rng);
        if expired || self.z > c.takeoff_exit_height {
            self.enter_state(Mode::Fly, None, ctx.params, rng);
        }
    }

    fn fly(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        let c = &ctx.params.cfg;
        self.heading += self.drift(ctx) * c.walk_wander;
        self.advance(ctx.params.fly_speed(self.z));
        self.pull_to_layer(ctx.params);

        if !self.tick_state(ctx.params, rng) {
            return;
        }
        let next = if rng.chance(c.fly_to_hover) { Mode::Hover } else { Mode::Land };
        self.enter_state(next, None, ctx.params, rng);
    }

    fn land(&mut self, ctx: &StepContext<'_>) {
        let c = &ctx.params.cfg;
        self.z = (self.z - c.land_rate).max(0.0);
        self.advance(ctx.params.fly_speed(self.z) * self.z.min(1.0));
        self.state_counter = self.state_counter.saturating_add(1);

        if self.z <= 0.0 {
            // Touchdown goes straight to walk without arming a cooldown.
            self.mode = Mode::Walk;
            self.state_counter = 0;
            self.state_duration = 0;
        }
    }

    fn hover(&mut self, ctx: &StepContext<'_>, rng: &mut SimRng) {
        let c = &ctx.params.cfg;
        let orbit = self.hover;
        let t = self.state_counter as f32;
        let ease = if c.hover_ease_frames == 0 {
            1.0
        } else {
            (t / c.hover_ease_frames as f32).min(1.0)
        };
        let angle = orbit.phase + orbit.direction * c.hover_spin * t;
        self.pos = orbit.anchor.offset(angle, orbit.radius * ease);
        self.pull_to_layer(ctx.params);

        if !self.tick_state(ctx.params, rng) {
            return;
        }
        let next = if rng.chance(c.hover_to_fly) { Mode::Fly } else { Mode::Land };
        self.enter_state(next, None, ctx.params, rng);
    }
}

/// Index picked by `roll` in `[0, 1)` from unnormalised `weights`.
/// Falls back to the last index when every weight is zero.
pub(crate) fn weighted_index(weights: &[f32], roll: f32) -> usize {
    if weights.is_empty() {
        return 0;
    }
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if total.is_nan() || total <= 0.0 {
        return weights.len() - 1;
    }
    let mut acc = 0.0;
    let point = roll * total;
    for (i, w) in weights.iter().enumerate() {
        acc += w.max(0.0);
        if point < acc {
            return i;
        }
    }
    weights.len() - 1
}
