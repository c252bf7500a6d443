//! `hv-cluster`: clusters of hex cells that grow, glow and fade.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`growth`]    | Seeded growth, hole filling, outline rings, edge depth, content |
//! | [`lifecycle`] | `ClusterTiming`, `CellPhase`: the per-cell opacity curve     |
//! | [`cluster`]   | `Cluster`, `ClusterParams`                                   |
//! | [`pool`]      | `ClusterPool`: reusable cluster slots with cooldown          |
//! | [`cap`]       | `DynamicCap`: coverage cap combined with a warm-up ramp      |
//! | [`error`]     | `ClusterError`, `ClusterResult<T>`                           |
//!
//! # Ownership
//!
//! A cluster holds the axial keys of the cells it owns; cells know nothing
//! about clusters.  Growth only ever claims inactive cells, and a cell is
//! dropped from the owner's list the moment it is reset, so an active cell
//! has exactly one owner.
//!
//! # Lifecycle
//!
//! ```text
//! inactive (cooldown 0) ──activate──▶ active ──frame_counter > total──▶ inactive (cooldown N)
//!        ▲                                                                      │
//!        └──────────────────────── cooldown ticks down to 0 ◀──────────────────┘
//! ```

pub mod cap;
pub mod cluster;
pub mod error;
pub mod growth;
pub mod lifecycle;
pub mod pool;


pub use cap::DynamicCap;
pub use cluster::{Cluster, ClusterParams, ClusterStep};
pub use error::{ClusterError, ClusterResult};
pub use lifecycle::{CellPhase, ClusterTiming};
pub use pool::ClusterPool;
