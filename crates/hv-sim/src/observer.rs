//! Hive observer trait for progress reporting and data collection.

use hv_core::{ClusterId, Frame};
use hv_grid::Axial;

use crate::FrameStats;

/// Callbacks invoked by [`Hive::advance`][crate::Hive::advance] and
/// [`Hive::run_frames`][crate::Hive::run_frames].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: cluster counter
///
/// ```rust
/// use hv_core::ClusterId;
/// use hv_grid::Axial;
/// use hv_sim::HiveObserver;
///
/// #[derive(Default)]
/// struct Spawns(usize);
///
/// impl HiveObserver for Spawns {
///     fn on_cluster_spawned(&mut self, _id: ClusterId, _seed: Axial, _user: bool) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait HiveObserver {
    /// Called at the very start of each frame, before any processing.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called after the proximity pass, with the frame's statistics.
    fn on_frame_end(&mut self, _stats: &FrameStats) {}

    /// A cluster was seeded, automatically or by a click.
    fn on_cluster_spawned(&mut self, _id: ClusterId, _seed: Axial, _user: bool) {}

    /// A cluster ran past its lifetime and released its cells.  `seed` is
    /// where it had been seeded.
    fn on_cluster_released(&mut self, _id: ClusterId, _seed: Option<Axial>) {}

    /// Called once after [`Hive::run_frames`][crate::Hive::run_frames]
    /// finishes.
    fn on_run_end(&mut self, _last: Frame) {}
}

/// A [`HiveObserver`] that does nothing.
pub struct NoopObserver;

impl HiveObserver for NoopObserver {}
