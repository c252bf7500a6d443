//! Engine error type.
//!
//! The simulation itself is best-effort and never fails mid-frame; errors are
//! confined to construction (bad canvas size, unusable configuration).
//! Sub-crates define their own enums where they have failure modes of their
//! own (`ClusterError`, `OutputError`).

use thiserror::Error;

/// The top-level error type for `hv-core` and the orchestrator.
#[derive(Debug, Error)]
pub enum HiveError {
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for the `hv-*` crates.
pub type HiveResult<T> = Result<T, HiveError>;
