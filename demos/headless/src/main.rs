//! headless: drives a hive without a display.
//!
//! Feeds the frame driver synthetic 60 Hz host timestamps (with an
//! occasional long stall to exercise the catch-up clamp), clicks the canvas
//! centre now and then, renders into a counting canvas and writes frame
//! statistics and cluster events as CSV.
//!
//! ```text
//! headless [config.json] [output_dir]
//! RUST_LOG=debug headless
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hv_bee::{Bee, Footprint};
use hv_core::{HiveConfig, Vec2};
use hv_grid::Cell;
use hv_output::{CsvStatsWriter, StatsObserver};
use hv_sim::{Canvas, FrameDriver, HiveBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const CANVAS_W:          f32 = 1_280.0;
const CANVAS_H:          f32 = 720.0;
const SEED:              u64 = 42;
const RUN_SECS:          f64 = 120.0;
const HOST_FRAME_MS:     f64 = 1_000.0 / 60.0;
/// Every this many host callbacks the host "stalls" for a quarter second.
const STALL_EVERY:       u64 = 900;
const STALL_MS:          f64 = 250.0;
const CLICK_EVERY:       u64 = 600;
/// Frame statistics are sampled once per logical second.
const SAMPLE_EVERY:      u64 = 60;

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Counts draw calls instead of drawing.
#[derive(Default)]
struct CountingCanvas {
    clears: u64,
    cells:  u64,
    prints: u64,
    bees:   u64,
}

impl Canvas for CountingCanvas {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn fill_cell(&mut self, cell: &Cell, _radius: f32) {
        if cell.active && cell.opacity > 0.0 {
            self.cells += 1;
        }
    }

    fn draw_footprint(&mut self, _print: &Footprint) {
        self.prints += 1;
    }

    fn draw_bee(&mut self, _bee: &Bee) {
        self.bees += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<HiveConfig> {
    let Some(path) = path else {
        return Ok(HiveConfig { seed: Some(SEED), ..HiveConfig::default() });
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: HiveConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("output"), PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    let mut hive = HiveBuilder::new(config)
        .canvas(CANVAS_W, CANVAS_H)
        .build()
        .context("building hive")?;

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let writer = CsvStatsWriter::new(&out_dir)?;
    let mut obs = StatsObserver::new(writer, SAMPLE_EVERY);
    let mut driver = FrameDriver::for_hive(&hive);
    let mut canvas = CountingCanvas::default();

    let wall = Instant::now();
    let callbacks = (RUN_SECS * 1_000.0 / HOST_FRAME_MS) as u64;
    let mut ts = 0.0;
    let mut clicks = 0;
    for i in 0..callbacks {
        ts += if i > 0 && i % STALL_EVERY == 0 { STALL_MS } else { HOST_FRAME_MS };
        driver.on_animation_frame(&mut hive, ts, Some(&mut canvas), &mut obs);

        if i > 0 && i % CLICK_EVERY == 0 {
            let out = hive.click(Vec2::new(CANVAS_W * 0.5, CANVAS_H * 0.5), &mut obs);
            clicks += 1;
            info!(scared = out.scared, cluster = ?out.cluster, "click");
        }
    }
    obs.finish()?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing statistics");
    }

    let stats = hive.stats();
    let (frame_rows, event_rows) = obs.rows_written();
    let (auto, user) = hive.clusters().spawn_counts();
    info!(
        frames = hive.frame().0,
        callbacks,
        clicks,
        auto_clusters = auto,
        user_clusters = user,
        released = hive.clusters().finished_count(),
        bees = stats.bee_count(),
        grounded = stats.bees_grounded,
        trail = stats.trail_len,
        renders = canvas.clears,
        cells_drawn = canvas.cells,
        prints_drawn = canvas.prints,
        bees_drawn = canvas.bees,
        elapsed_ms = wall.elapsed().as_millis() as u64,
        "run complete"
    );
    info!(dir = %out_dir.display(), frame_rows, event_rows, "statistics written");
    Ok(())
}
