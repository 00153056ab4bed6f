//! Topology error type.

use thiserror::Error;

use wsn_core::NodeId;

/// Errors produced by `wsn-topology`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    /// Malformed or disconnected adjacency input.  Fatal; never retried.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("node {0} not found in topology")]
    NodeNotFound(NodeId),

    #[error("no link between {0} and {1}")]
    EdgeNotFound(NodeId, NodeId),

    #[error("weight delta {0} must be finite and non-negative")]
    InvalidWeightDelta(f64),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },
}

pub type TopologyResult<T> = Result<T, TopologyError>;
