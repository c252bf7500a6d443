//! `StatsObserver<W>`: bridges `HiveObserver` to an `OutputWriter`.

use hv_core::{ClusterId, Frame};
use hv_grid::Axial;
use hv_sim::{FrameStats, HiveObserver};

use crate::row::{ClusterEvent, ClusterEventRow, FrameRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`HiveObserver`] that writes every `interval`-th frame's statistics and
/// every cluster event to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `HiveObserver`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct StatsObserver<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    frame:      u64,
    frames_out: u64,
    events_out: u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> StatsObserver<W> {
    /// Sample one frame in `interval` (at least 1).  Cluster events are
    /// always written.
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval:   interval.max(1),
            frame:      0,
            frames_out: 0,
            events_out: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Frame rows and cluster event rows written so far.
    pub fn rows_written(&self) -> (u64, u64) {
        (self.frames_out, self.events_out)
    }

    /// Flush the writer.  Also called by `on_run_end`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn event(&mut self, cluster: ClusterId, event: ClusterEvent, seed: Option<Axial>) {
        let row = ClusterEventRow { frame: self.frame, cluster, event, seed };
        let result = self.writer.write_cluster_event(&row);
        if result.is_ok() {
            self.events_out += 1;
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> HiveObserver for StatsObserver<W> {
    fn on_frame_start(&mut self, frame: Frame) {
        self.frame = frame.0;
    }

    fn on_frame_end(&mut self, stats: &FrameStats) {
        if stats.frame % self.interval != 0 {
            return;
        }
        let result = self.writer.write_frame(&FrameRow::from(stats));
        if result.is_ok() {
            self.frames_out += 1;
        }
        self.store_err(result);
    }

    fn on_cluster_spawned(&mut self, id: ClusterId, seed: Axial, user: bool) {
        let event = if user { ClusterEvent::UserSpawned } else { ClusterEvent::Spawned };
        self.event(id, event, Some(seed));
    }

    fn on_cluster_released(&mut self, id: ClusterId, seed: Option<Axial>) {
        self.event(id, ClusterEvent::Released, seed);
    }

    fn on_run_end(&mut self, _last: Frame) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
