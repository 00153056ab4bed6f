use thiserror::Error;
use wsn_topology::TopologyError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoutingError {
    #[error("buffer vector has {got} entries but the topology has {expected} nodes")]
    BufferLengthMismatch { expected: usize, got: usize },

    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
