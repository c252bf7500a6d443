//! Engine configuration.
//!
//! One [`HiveConfig`] is built by the host (or loaded from JSON with the
//! `serde` feature) and handed to the orchestrator builder, which keeps it
//! immutable for the rest of the run.  Every tunable has a default chosen for
//! visual appeal; none of the numbers is an invariant.
//!
//! Durations are seconds-equivalents.  Subsystems convert them to frames with
//! [`FrameRate::frames`](crate::FrameRate::frames) so that all logic still
//! counts frames.

use std::f32::consts::FRAC_PI_4;

use crate::{HiveError, HiveResult};

/// Smallest canvas area per bee accepted by [`HiveConfig::sanitized`].
pub const MIN_DENSITY_RATIO: f32 = 1_000.0;

/// Hard ceiling on the bee population, whatever the configuration says.
pub const BEE_COUNT_CEILING: usize = 2_000;

// ── Span ──────────────────────────────────────────────────────────────────────

/// An inclusive `[min, max]` range, typically seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Non-negative, ordered copy of `self`.
    pub fn sanitized(self) -> Self {
        let lo = self.min.max(0.0);
        let hi = self.max.max(0.0);
        Span { min: lo.min(hi), max: lo.max(hi) }
    }

    fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

// ── HiveConfig ────────────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HiveConfig {
    /// Logical frames per second.  Default: 60.
    pub fps: f32,

    /// RNG seed.  `None` seeds from entropy; tests and headless runs pin it.
    pub seed: Option<u64>,

    pub grid:      GridConfig,
    pub clusters:  ClusterConfig,
    pub bees:      BeeConfig,
    pub proximity: ProximityConfig,
    pub trail:     TrailConfig,
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            fps:       60.0,
            seed:      None,
            grid:      GridConfig::default(),
            clusters:  ClusterConfig::default(),
            bees:      BeeConfig::default(),
            proximity: ProximityConfig::default(),
            trail:     TrailConfig::default(),
        }
    }
}

impl HiveConfig {
    /// Reject values that cannot be clamped into meaning (NaN, infinities).
    pub fn validate(&self) -> HiveResult<()> {
        let scalars = [
            ("fps", self.fps),
            ("grid.cell_radius", self.grid.cell_radius),
            ("bees.size", self.bees.size),
            ("bees.density_ratio", self.bees.density_ratio),
            ("clusters.target_coverage", self.clusters.target_coverage),
            ("clusters.visible_secs", self.clusters.visible_secs),
            ("clusters.fade_in_secs", self.clusters.fade_in_secs),
            ("clusters.fade_out_secs", self.clusters.fade_out_secs),
            ("clusters.ring_delay_secs", self.clusters.ring_delay_secs),
            ("clusters.ramp_start_secs", self.clusters.ramp_start_secs),
            ("clusters.ramp_step_secs", self.clusters.ramp_step_secs),
            ("proximity.threshold_factor", self.proximity.threshold_factor),
        ];
        if let Some((name, v)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(HiveError::Config(format!("{name} must be finite, got {v}")));
        }
        let spans = [
            ("bees.idle_secs", self.bees.idle_secs),
            ("bees.walk_secs", self.bees.walk_secs),
            ("bees.fly_secs", self.bees.fly_secs),
            ("bees.hover_secs", self.bees.hover_secs),
            ("bees.retarget_secs", self.bees.retarget_secs),
        ];
        if let Some((name, _)) = spans.iter().find(|(_, s)| !s.is_finite()) {
            return Err(HiveError::Config(format!("{name} must be finite")));
        }
        Ok(())
    }

    /// Copy of `self` with every out-of-range number clamped to the nearest
    /// sensible value.  Call after [`validate`](Self::validate).
    pub fn sanitized(&self) -> Self {
        let mut c = self.clone();
        c.fps = c.fps.clamp(1.0, 240.0);
        c.grid.cell_radius = c.grid.cell_radius.max(2.0);

        let cl = &mut c.clusters;
        cl.target_size = cl.target_size.max(1);
        cl.visible_secs = cl.visible_secs.max(0.0);
        cl.visible_jitter = cl.visible_jitter.clamp(0.0, 0.9);
        cl.fade_in_secs = cl.fade_in_secs.max(0.0);
        cl.fade_out_secs = cl.fade_out_secs.max(0.0);
        cl.ring_delay_secs = cl.ring_delay_secs.max(0.0);
        cl.cooldown_secs = cl.cooldown_secs.max(0.0);
        cl.outline_rings = cl.outline_rings.min(2);
        cl.border_opacity_divisor = cl.border_opacity_divisor.max(1.0);
        cl.min_growth_probability = cl.min_growth_probability.clamp(0.0, 1.0);
        cl.target_coverage = cl.target_coverage.clamp(0.0, 1.0);
        cl.max_clusters = cl.max_clusters.max(1);
        cl.pool_size = cl.pool_size.max(cl.max_clusters);
        cl.ramp_start_secs = cl.ramp_start_secs.max(0.0);
        cl.ramp_step_secs = cl.ramp_step_secs.max(0.0);
        cl.spawn_stagger_secs = cl.spawn_stagger_secs.max(0.0);

        let b = &mut c.bees;
        b.size = b.size.max(1.0);
        b.density_ratio = b.density_ratio.max(MIN_DENSITY_RATIO);
        b.max_bees = b.max_bees.clamp(1, BEE_COUNT_CEILING);
        for span in [
            &mut b.idle_secs,
            &mut b.blocked_secs,
            &mut b.walk_secs,
            &mut b.turn_secs,
            &mut b.flutter_secs,
            &mut b.takeoff_secs,
            &mut b.fly_secs,
            &mut b.hover_secs,
            &mut b.retarget_secs,
            &mut b.flee_distance,
        ] {
            *span = span.sanitized();
        }
        b.takeoff_ceiling = b.takeoff_ceiling.clamp(0.3, 2.0);
        b.honey_target_chance = b.honey_target_chance.clamp(0.0, 1.0);

        let p = &mut c.proximity;
        p.threshold_factor = p.threshold_factor.max(0.1);
        p.airborne_scale = p.airborne_scale.clamp(0.1, 1.0);
        p.land_preference = p.land_preference.clamp(0.0, 1.0);

        c.trail.lifetime_secs = c.trail.lifetime_secs.max(0.0);
        c
    }

    /// Bee population for a canvas of `width` × `height` pixels:
    /// `area / density_ratio`, clamped to `[1, max_bees]`.
    pub fn bee_count(&self, width: f32, height: f32) -> usize {
        let density = self.bees.density_ratio.max(MIN_DENSITY_RATIO);
        let raw = (width.max(0.0) * height.max(0.0)) / density;
        let ceiling = self.bees.max_bees.clamp(1, BEE_COUNT_CEILING);
        if !raw.is_finite() {
            return 1;
        }
        (raw.floor() as usize).clamp(1, ceiling)
    }
}

// ── GridConfig ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Hex cell radius `s` in pixels.
    pub cell_radius: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_radius: 18.0 }
    }
}

// ── ClusterConfig ─────────────────────────────────────────────────────────────

/// Probabilities used when filling cluster cells, by edge depth.
///
/// Whatever is left over in each band goes to the band's default content
/// (honey-capped at the rim, empty in the middle band, brood-capped inside).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContentWeights {
    /// Edge depth 1–2.
    pub rim_empty:        f32,
    pub rim_honey_filled: f32,
    /// Edge depth 3.
    pub middle_pollen:    f32,
    /// Edge depth ≥ 4.
    pub core_hatching:    f32,
    pub core_empty:       f32,
    pub core_brood_cell:  f32,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            rim_empty:        0.2,
            rim_honey_filled: 0.2,
            middle_pollen:    0.8,
            core_hatching:    0.1,
            core_empty:       0.1,
            core_brood_cell:  0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterConfig {
    /// Growth stops once this many cells were visited.
    pub target_size: usize,
    /// Base visible time before jitter and ring inflation.
    pub visible_secs: f32,
    /// Relative jitter applied to `visible_secs` (0.2 = ±20 %).
    pub visible_jitter: f32,
    pub fade_in_secs: f32,
    pub fade_out_secs: f32,
    /// Extra start delay per ring of distance from the seed.
    pub ring_delay_secs: f32,
    /// Reuse lockout after a cluster deactivates.
    pub cooldown_secs: f32,
    /// Number of faint outline rings generated around a cluster (0–2).
    pub outline_rings: u8,
    /// Border cell opacity is divided by `divisor × ring`.
    pub border_opacity_divisor: f32,
    /// Floor of the distance-decayed growth probability.
    pub min_growth_probability: f32,
    /// Growth probability lost per hex of distance from the seed.
    pub growth_falloff: f32,
    pub content: ContentWeights,

    /// Fraction of the grid clusters should cover at steady state.
    pub target_coverage: f32,
    /// Safety ceiling on simultaneously active clusters.
    pub max_clusters: usize,
    /// Pool slots, including clusters cooling down.  At least `max_clusters`.
    pub pool_size: usize,
    /// No automatic clusters before this many seconds.
    pub ramp_start_secs: f32,
    /// One more cap slot every this many seconds after `ramp_start_secs`.
    pub ramp_step_secs: f32,
    /// Minimum time between two automatic spawns.
    pub spawn_stagger_secs: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            target_size:            120,
            visible_secs:           10.0,
            visible_jitter:         0.2,
            fade_in_secs:           1.0,
            fade_out_secs:          3.0,
            ring_delay_secs:        0.5,
            cooldown_secs:          4.0,
            outline_rings:          2,
            border_opacity_divisor: 3.0,
            min_growth_probability: 0.3,
            growth_falloff:         0.1,
            content:                ContentWeights::default(),
            target_coverage:        0.35,
            max_clusters:           6,
            pool_size:              12,
            ramp_start_secs:        1.0,
            ramp_step_secs:         4.0,
            spawn_stagger_secs:     1.5,
        }
    }
}

// ── BeeConfig ─────────────────────────────────────────────────────────────────

/// Agent tunables.  Distances are in multiples of `size` unless named `_px`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BeeConfig {
    /// Nominal bee size in pixels.
    pub size: f32,
    /// Canvas area (px²) per bee.
    pub density_ratio: f32,
    pub max_bees: usize,

    // Per-state durations.
    pub idle_secs:    Span,
    pub blocked_secs: Span,
    pub walk_secs:    Span,
    pub turn_secs:    Span,
    pub flutter_secs: Span,
    pub takeoff_secs: Span,
    pub fly_secs:     Span,
    pub hover_secs:   Span,

    // Transition weights.
    /// `idle` → walk / flutter; the remainder turns.
    pub idle_to_walk:    f32,
    pub idle_to_flutter: f32,
    /// Per-frame chance a walk drops to idle early.
    pub walk_idle_chance: f32,
    /// Weights of turn / takeoff / flutter / idle at the end of a walk.
    pub walk_exit_weights: [f32; 4],
    /// `blocked` expiry → takeoff; the remainder turns.
    pub blocked_to_takeoff: f32,
    /// `fly` expiry → hover; the remainder lands.
    pub fly_to_hover: f32,
    /// `hover` expiry → fly; the remainder lands.
    pub hover_to_fly: f32,

    // Motion.
    /// Walking speed, px per frame per unit of size.
    pub walk_speed: f32,
    /// Flying speed at layer 1, px per frame per unit of size.
    pub fly_speed: f32,
    /// Extra fly speed per unit of height.
    pub fly_speed_per_height: f32,
    /// Noise sample rate along the frame axis.
    pub noise_rate: f32,
    /// Heading wobble amplitude while walking (radians per frame).
    pub walk_wander: f32,
    /// Turn rate in place (radians per frame).
    pub turn_rate: f32,
    /// Turn rate multiplier when airborne.
    pub air_turn_factor: f32,
    pub takeoff_rate: f32,
    pub takeoff_ceiling: f32,
    /// Height at which takeoff hands over to fly.
    pub takeoff_exit_height: f32,
    pub land_rate: f32,
    /// Fraction of the gap to the nearest airborne layer closed per frame.
    pub layer_pull: f32,
    pub hover_radius: f32,
    pub hover_ease_frames: u32,
    /// Hover angular speed (radians per frame).
    pub hover_spin: f32,
    /// Protective cooldown applied on entering flutter/takeoff/hover/land.
    pub entry_cooldown_secs: f32,

    // Targeting.
    pub retarget_secs: Span,
    /// Chance a new target is an active honey cell rather than a random
    /// canvas point (when any honey cell is showing).
    pub honey_target_chance: f32,
    /// Retarget after loitering this many frames at the target.
    pub max_arrived_frames: u32,
    pub arrive_radius: f32,
    pub steer_gain_walk: f32,
    pub steer_gain_fly: f32,
    pub steer_gain_other: f32,

    // Orchestrator-level nudges.
    /// Per-frame chance of landing when flying over an active cluster.
    pub land_bias_chance: f32,
    /// Distance to target (× size) above which a grounded bee may take off.
    pub long_flight_distance: f32,
    /// Threshold multiplier when the bee is over an active cluster.
    pub long_flight_cluster_factor: f32,
    /// Chance, once per second, of the long-distance takeoff.
    pub long_flight_chance: f32,
    /// Chance multiplier when the bee is over an active cluster.
    pub long_flight_cluster_damp: f32,
    /// Off-canvas slack before a bee is repositioned, px.
    pub edge_buffer_px: f32,

    // Scare.
    pub scare_radius: f32,
    pub scare_min_radius_px: f32,
    /// Flee distance in px.
    pub flee_distance: Span,
    /// Heading jitter (radians) on the away direction.
    pub scare_jitter: f32,
    pub scare_takeoff_frames: u32,
}

impl Default for BeeConfig {
    fn default() -> Self {
        Self {
            size:          14.0,
            density_ratio: 40_000.0,
            max_bees:      120,

            idle_secs:    Span::new(1.0, 3.0),
            blocked_secs: Span::new(0.4, 1.0),
            walk_secs:    Span::new(2.0, 5.0),
            turn_secs:    Span::new(0.4, 1.0),
            flutter_secs: Span::new(0.5, 1.2),
            takeoff_secs: Span::new(0.6, 1.2),
            fly_secs:     Span::new(3.0, 7.0),
            hover_secs:   Span::new(1.0, 2.5),

            idle_to_walk:       0.85,
            idle_to_flutter:    0.075,
            walk_idle_chance:   0.002,
            walk_exit_weights:  [0.35, 0.25, 0.15, 0.25],
            blocked_to_takeoff: 0.3,
            fly_to_hover:       0.35,
            hover_to_fly:       0.5,

            walk_speed:           0.045,
            fly_speed:            0.12,
            fly_speed_per_height: 0.5,
            noise_rate:           0.015,
            walk_wander:          0.06,
            turn_rate:            0.07,
            air_turn_factor:      0.4,
            takeoff_rate:         0.03,
            takeoff_ceiling:      2.0,
            takeoff_exit_height:  0.9,
            land_rate:            0.025,
            layer_pull:           0.05,
            hover_radius:         0.5,
            hover_ease_frames:    10,
            hover_spin:           0.08,
            entry_cooldown_secs:  0.5,

            retarget_secs:       Span::new(4.0, 10.0),
            honey_target_chance: 0.6,
            max_arrived_frames:  90,
            arrive_radius:       1.2,
            steer_gain_walk:     0.06,
            steer_gain_fly:      0.08,
            steer_gain_other:    0.03,

            land_bias_chance:           0.02,
            long_flight_distance:       18.0,
            long_flight_cluster_factor: 1.6,
            long_flight_chance:         0.35,
            long_flight_cluster_damp:   0.5,
            edge_buffer_px:             40.0,

            scare_radius:         8.0,
            scare_min_radius_px:  80.0,
            flee_distance:        Span::new(120.0, 260.0),
            scare_jitter:         0.3,
            scare_takeoff_frames: 6,
        }
    }
}

// ── ProximityConfig ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProximityConfig {
    /// Interaction distance as a multiple of bee size; also the bucket size.
    pub threshold_factor: f32,
    /// Distance multiplier for airborne layers.
    pub airborne_scale: f32,
    /// Half-angle of the forward cone in radians.
    pub cone_half_angle: f32,
    /// Chance an airborne bee lands instead of hovering.
    pub land_preference: f32,
    /// Added to `land_preference` over an active cluster.
    pub cluster_land_boost: f32,
    pub land_dwell_secs: f32,
    pub hover_dwell_secs: f32,
    pub blocked_dwell_secs: f32,
    pub hover_secs: f32,
    pub blocked_secs: f32,
    pub cooldown_secs: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            threshold_factor:   1.8,
            airborne_scale:     0.7,
            cone_half_angle:    FRAC_PI_4,
            land_preference:    0.65,
            cluster_land_boost: 0.2,
            land_dwell_secs:    0.6,
            hover_dwell_secs:   0.4,
            blocked_dwell_secs: 0.5,
            hover_secs:         0.5,
            blocked_secs:       0.6,
            cooldown_secs:      0.8,
        }
    }
}

// ── TrailConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrailConfig {
    /// Global footprint cap; the oldest entries go first.
    pub max_entries: usize,
    pub lifetime_secs: f32,
    /// Minimum frames between two footprints of one bee.
    pub step_frames: u32,
    /// How long feet stay dusty after leaving a pollen/honey cell.
    pub sticky_secs: f32,
    /// Footprint scale relative to bee size.
    pub scale: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_entries:   600,
            lifetime_secs: 4.0,
            step_frames:   8,
            sticky_secs:   2.0,
            scale:         0.35,
        }
    }
}
