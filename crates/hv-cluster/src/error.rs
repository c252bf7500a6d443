use thiserror::Error;

use hv_grid::Axial;

/// Reasons a cluster could not be seeded.  None of them is fatal: the
/// orchestrator logs and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("no cell at {0}")]
    CellNotFound(Axial),

    #[error("cell {0} already belongs to an active cluster")]
    CellAlreadyActive(Axial),

    #[error("no cluster slot is free (all active or cooling down)")]
    PoolExhausted,

    #[error("active cluster cap of {cap} reached")]
    CapReached { cap: usize },
}

pub type ClusterResult<T> = Result<T, ClusterError>;
