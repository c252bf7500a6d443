//! The `OutputWriter` trait implemented by backend writers.

use crate::{ClusterEventRow, FrameRow, OutputResult};

/// A statistics sink.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with [`StatsObserver::take_error`].
///
/// [`StatsObserver::take_error`]: crate::StatsObserver::take_error
pub trait OutputWriter {
    /// Write one sampled frame.
    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()>;

    /// Write one cluster spawn or release.
    fn write_cluster_event(&mut self, row: &ClusterEventRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
