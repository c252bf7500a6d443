//! `hv-spatial`: who is in whose way.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`hash`]      | `SpatialHash`, `BucketKey`: planar buckets per height layer |
//! | [`proximity`] | `ProximityParams`, `ProximityResolver`                      |
//!
//! # Cost
//!
//! The hash is rebuilt once per frame in O(N).  Each bee then scans the
//! nine buckets around it on its own layer, so the pass is linear while
//! bees are spread out relative to the bucket size.  Bees crowded into one
//! bucket degrade toward quadratic within that bucket; nothing caps that.

pub mod hash;
pub mod proximity;

#[cfg(test)]
mod tests;

pub use hash::{BucketKey, SpatialHash};
pub use proximity::{ProximityParams, ProximityResolver};
