use thiserror::Error;

use wsn_core::NodeId;
use wsn_routing::RoutingError;
use wsn_topology::TopologyError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulingError {
    /// A full pass found nothing legal to send while messages remain.
    /// Carries the buffer vector and the nodes still holding messages.
    #[error("no legal transmission in slot {slot} while {stranded:?} still hold messages (buffers {buffers:?})")]
    SchedulingDeadlock {
        slot:     usize,
        buffers:  Vec<u32>,
        stranded: Vec<NodeId>,
    },

    #[error("{node} buffers {buffered} message(s) but has {routed} route(s)")]
    InconsistentRoutes {
        node:     NodeId,
        buffered: u32,
        routed:   usize,
    },

    #[error("{what} covers {got} nodes but the topology has {expected}")]
    NodeCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
