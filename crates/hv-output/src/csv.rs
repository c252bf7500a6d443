//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `frame_stats.csv`
//! - `cluster_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use hv_bee::Mode;

use crate::writer::OutputWriter;
use crate::{ClusterEventRow, FrameRow, OutputResult};

const FRAME_COLUMNS: [&str; 8] = [
    "frame",
    "active_clusters",
    "active_cells",
    "cluster_cap",
    "trail_len",
    "bees_grounded",
    "bees_airborne",
    "proximity_hits",
];

/// Writes hive statistics to two CSV files.
pub struct CsvStatsWriter {
    frames:   Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvStatsWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    ///
    /// Frame columns end with one `mode_<name>` count per bee mode.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut frames = Writer::from_path(dir.join("frame_stats.csv"))?;
        let header: Vec<String> = FRAME_COLUMNS
            .iter()
            .map(|c| (*c).to_owned())
            .chain(Mode::ALL.iter().map(|m| format!("mode_{}", m.as_str())))
            .collect();
        frames.write_record(&header)?;

        let mut events = Writer::from_path(dir.join("cluster_events.csv"))?;
        events.write_record(["frame", "cluster", "event", "seed_q", "seed_r"])?;

        Ok(Self { frames, events, finished: false })
    }
}

impl OutputWriter for CsvStatsWriter {
    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()> {
        let mut record = vec![
            row.frame.to_string(),
            row.active_clusters.to_string(),
            row.active_cells.to_string(),
            row.cluster_cap.to_string(),
            row.trail_len.to_string(),
            row.bees_grounded.to_string(),
            row.bees_airborne.to_string(),
            row.proximity_hits.to_string(),
        ];
        record.extend(row.mode_counts.iter().map(u32::to_string));
        self.frames.write_record(&record)?;
        Ok(())
    }

    fn write_cluster_event(&mut self, row: &ClusterEventRow) -> OutputResult<()> {
        let (q, r) = match row.seed {
            Some(a) => (a.q.to_string(), a.r.to_string()),
            None => (String::new(), String::new()),
        };
        self.events.write_record(&[
            row.frame.to_string(),
            row.cluster.0.to_string(),
            row.event.as_str().to_owned(),
            q,
            r,
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
