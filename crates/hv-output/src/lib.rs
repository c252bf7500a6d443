//! `hv-output`: statistics writers for the hive animation engine.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `frame_stats.csv`, `cluster_events.csv`    |
//!
//! Writers implement [`OutputWriter`] and are driven by [`StatsObserver`],
//! which implements `hv_sim::HiveObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hv_output::{CsvStatsWriter, StatsObserver};
//!
//! let writer = CsvStatsWriter::new(Path::new("./output")).unwrap();
//! let mut obs = StatsObserver::new(writer, 60);
//! hive.run_frames(3_600, &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvStatsWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsObserver;
pub use row::{ClusterEvent, ClusterEventRow, FrameRow};
pub use writer::OutputWriter;
