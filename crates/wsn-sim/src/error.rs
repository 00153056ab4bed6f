use thiserror::Error;
use wsn_core::{NodeId, WsnError};
use wsn_schedule::SchedulingError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Rejected before the first frame runs.
    #[error("{0}")]
    InvalidParameter(#[from] WsnError),

    /// A per-node buffer counter exceeded `u32::MAX`.
    #[error("buffer at {node} overflowed during frame {frame}")]
    BufferOverflow { node: NodeId, frame: u64 },

    #[error("scheduling failed: {0}")]
    Scheduling(#[from] SchedulingError),
}

pub type SimResult<T> = Result<T, SimError>;
