//! Forward-cone proximity checks between bees.
//!
//! A bee that has another bee close ahead of it on the same layer reacts
//! once per frame:
//!
//! * **grounded**: stops (`blocked`).
//! * **airborne**: lands, more likely over an active cluster, or otherwise
//!   hovers briefly.
//!
//! Each reaction sets a dwell lock and a proximity cooldown so the pair
//! does not re-trigger every frame.

use tracing::trace;

use hv_bee::{Bee, BeeParams, Mode};
use hv_core::{FrameRate, ProximityConfig, SimRng, Vec2, angle_diff};

use crate::SpatialHash;

/// [`ProximityConfig`] resolved to pixels and frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProximityParams {
    /// Interaction distance on the ground, px.  Also the bucket size.
    pub threshold:          f32,
    pub airborne_scale:     f32,
    pub cone_half_angle:    f32,
    pub land_preference:    f32,
    pub cluster_land_boost: f32,
    pub land_dwell:         u32,
    pub hover_dwell:        u32,
    pub blocked_dwell:      u32,
    pub hover_frames:       u32,
    pub blocked_frames:     u32,
    pub cooldown:           u32,
}

impl ProximityParams {
    pub fn from_config(cfg: &ProximityConfig, bee_size: f32, rate: FrameRate) -> Self {
        Self {
            threshold:          (cfg.threshold_factor * bee_size).max(1.0),
            airborne_scale:     cfg.airborne_scale,
            cone_half_angle:    cfg.cone_half_angle,
            land_preference:    cfg.land_preference,
            cluster_land_boost: cfg.cluster_land_boost,
            land_dwell:         rate.frames(cfg.land_dwell_secs),
            hover_dwell:        rate.frames(cfg.hover_dwell_secs),
            blocked_dwell:      rate.frames(cfg.blocked_dwell_secs),
            hover_frames:       rate.frames(cfg.hover_secs).max(1),
            blocked_frames:     rate.frames(cfg.blocked_secs).max(1),
            cooldown:           rate.frames(cfg.cooldown_secs),
        }
    }

    /// Interaction distance on `layer`.
    #[inline]
    pub fn reach(&self, layer: u8) -> f32 {
        if layer == 0 { self.threshold } else { self.threshold * self.airborne_scale }
    }
}

/// Owns the spatial hash and runs the once-per-frame proximity pass.
#[derive(Clone, Debug)]
pub struct ProximityResolver {
    params: ProximityParams,
    hash:   SpatialHash,
}

impl ProximityResolver {
    pub fn new(params: ProximityParams) -> Self {
        Self { hash: SpatialHash::new(params.threshold), params }
    }

    pub fn params(&self) -> &ProximityParams {
        &self.params
    }

    pub fn hash(&self) -> &SpatialHash {
        &self.hash
    }

    /// Rebuild the hash from the bees' final positions for this frame and
    /// let every eligible bee react to the first bee found ahead of it.
    ///
    /// A bee is skipped while its dwell lock or cooldown runs, or while it
    /// is turning.  `over_cluster` reports whether a point lies over an
    /// active cluster cell.  Returns the number of bees that reacted.
    pub fn resolve<F>(
        &mut self,
        bees:         &mut [Bee],
        over_cluster: F,
        bee_params:   &BeeParams,
        rng:          &mut SimRng,
    ) -> usize
    where
        F: Fn(Vec2) -> bool,
    {
        self.hash.rebuild(bees.iter().map(|b| (b.pos, b.z)));

        let mut reactions = 0;
        for i in 0..bees.len() {
            let bee = &bees[i];
            if bee.dwell() > 0 || bee.cooldown() > 0 || bee.mode() == Mode::Turn {
                continue;
            }
            let Some(other) = self.first_ahead(i, bees) else {
                continue;
            };

            // Reaction follows the hash layer so bucket, reach and response agree.
            let bee = &mut bees[i];
            if SpatialHash::layer_of(bee.z) > 0 {
                let mut p_land = self.params.land_preference;
                if over_cluster(bee.pos) {
                    p_land += self.params.cluster_land_boost;
                }
                if rng.chance(p_land) {
                    bee.enter_state(Mode::Land, None, bee_params, rng);
                    bee.lock(self.params.land_dwell, self.params.cooldown);
                } else {
                    bee.enter_state(Mode::Hover, Some(self.params.hover_frames), bee_params, rng);
                    bee.lock(self.params.hover_dwell, self.params.cooldown);
                }
            } else {
                bee.enter_state(Mode::Blocked, Some(self.params.blocked_frames), bee_params, rng);
                bee.lock(self.params.blocked_dwell, self.params.cooldown);
            }
            trace!(bee = %bee.id, other = other, mode = %bee.mode(), "proximity reaction");
            reactions += 1;
        }
        reactions
    }

    /// Index of the first bee within reach and inside the forward cone of
    /// `bees[i]`, on the same layer.
    fn first_ahead(&self, i: usize, bees: &[Bee]) -> Option<usize> {
        let me = &bees[i];
        let layer = SpatialHash::layer_of(me.z);
        let reach = self.params.reach(layer);
        let reach_sq = reach * reach;

        self.hash.query(me.pos, me.z).find(|&j| {
            if j == i {
                return false;
            }
            let other = &bees[j];
            if me.pos.distance_sq(other.pos) > reach_sq {
                return false;
            }
            let bearing = me.pos.bearing_to(other.pos);
            angle_diff(me.heading, bearing).abs() <= self.params.cone_half_angle
        })
    }
}
