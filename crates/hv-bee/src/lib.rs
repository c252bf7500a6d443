//! `hv-bee`: bee agents and their motion state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`mode`]      | `Mode`: the nine motion states                                 |
//! | [`params`]    | `BeeParams`: `BeeConfig` resolved to frames                    |
//! | [`wander`]    | `Wander`: shared simplex noise for heading drift               |
//! | [`target`]    | `Target`: point a bee steers toward                            |
//! | [`bee`]       | `Bee`: state, `enter_state`, counters, scare, placement        |
//! | [`behavior`]  | `StepContext`, per-frame steering and state dispatch           |
//! | [`footprint`] | `Footprint`, `FootSide`, `FootprintParams`: dusty feet         |
//!
//! # Frame order
//!
//! The hive drives each bee in two calls per frame:
//!
//! 1. [`Bee::tick_counters`]: dwell lock and proximity cooldown count down.
//! 2. [`Bee::step`]: steer toward the target, run the current state's
//!    behavior, then derive `on_ground` / `ground_motion`.
//!
//! [`Bee::footprint`] is called after `step` with the content of the cell
//! under the bee.
//!
//! # Transitions on state expiry
//!
//! ```text
//! idle     ─▶ walk | flutter | turn
//! blocked  ─▶ turn | takeoff
//! walk     ─▶ turn | takeoff | flutter | idle    (idle also early, by chance)
//! turn     ─▶ walk
//! flutter  ─▶ walk
//! takeoff  ─▶ fly                                (or once high enough)
//! fly      ─▶ hover | land
//! hover    ─▶ fly | land
//! land     ─▶ walk                               (on touchdown, no cooldown)
//! ```

pub mod bee;
pub mod behavior;
pub mod footprint;
pub mod mode;
pub mod params;
pub mod target;
pub mod wander;

#[cfg(test)]
mod tests;

pub use bee::{Bee, ON_GROUND_HEIGHT};
pub use behavior::StepContext;
pub use footprint::{FootSide, Footprint, FootprintParams};
pub use mode::Mode;
pub use params::BeeParams;
pub use target::Target;
pub use wander::Wander;
