//! `hv-sim`: frame loop orchestrator for the hive animation engine.
//!
//! # Frame loop
//!
//! ```text
//! every logical frame (Hive::advance):
//!   ① Clock        frame counter advances; bee dwell/cooldown counters tick.
//!   ② Spawn        one automatic cluster if the dynamic cap and the spawn
//!                  stagger allow.
//!   ③ Clusters     opacity update for active clusters, cooldown for the rest.
//!   ④ Trail        footprints age out.
//!   ⑤ Honey        active honey cells are cached for targeting.
//!   ⑥ Bees         step in height order; grounded movers leave footprints.
//!   ⑦ Orchestrate  retarget, land bias, edge wrap, long-distance takeoff.
//!   ⑧ Proximity    spatial-hash pass over final positions.
//!
//! every host callback (FrameDriver::on_animation_frame):
//!   fixed-step catch-up (≤ 100 ms per callback), then Hive::render once.
//! ```
//!
//! # Modules
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | `builder`  | [`HiveBuilder`]                                        |
//! | `canvas`   | [`Canvas`] drawing surface trait                       |
//! | `driver`   | [`FrameDriver`] fixed-step host adapter                |
//! | `hive`     | [`Hive`], [`ClickOutcome`]                             |
//! | `observer` | [`HiveObserver`], [`NoopObserver`]                     |
//! | `stats`    | [`FrameStats`]                                         |
//! | `trail`    | [`TrailBuffer`] bounded footprint store                |
//!
//! # Cargo features
//!
//! | Feature | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Serialize/Deserialize for `FrameStats` and the config.    |

pub mod builder;
pub mod canvas;
pub mod driver;
pub mod hive;
pub mod observer;
pub mod stats;
pub mod trail;

#[cfg(test)]
mod tests;

pub use builder::HiveBuilder;
pub use canvas::Canvas;
pub use driver::FrameDriver;
pub use hive::{ClickOutcome, Hive};
pub use observer::{NoopObserver, HiveObserver};
pub use stats::FrameStats;
pub use trail::TrailBuffer;
