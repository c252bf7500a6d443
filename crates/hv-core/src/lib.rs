//! `hv-core`: foundational types for the hive animation engine.
//!
//! This crate is a dependency of every other `hv-*` crate.  It has no `hv-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `BeeId`, `ClusterId`                                  |
//! | [`geo`]         | `Vec2`, angle wrapping and shortest angular delta     |
//! | [`time`]        | `Frame`, `FrameRate`, `FrameClock`, `FixedStep`       |
//! | [`rng`]         | `SimRng`: the single simulation RNG                   |
//! | [`config`]      | `HiveConfig` and its per-subsystem sections           |
//! | [`error`]       | `HiveError`, `HiveResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and id types.     |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BeeConfig, ClusterConfig, ContentWeights, GridConfig, HiveConfig, ProximityConfig, Span,
    TrailConfig,
};
pub use error::{HiveError, HiveResult};
pub use geo::{Vec2, angle_diff, wrap_angle};
pub use ids::{BeeId, ClusterId};
pub use rng::SimRng;
pub use time::{FixedStep, Frame, FrameClock, FrameRate};
