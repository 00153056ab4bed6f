//! In-flight message bookkeeping.

use std::collections::VecDeque;

use wsn_core::NodeId;
use wsn_topology::Route;

/// One buffered message: where it came from and the path it still has to
/// travel.  Each message owns its route, so messages that share a
/// topological path never alias each other's progress.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveRoute {
    /// Node that generated the message; credited on delivery.
    pub origin: NodeId,
    /// Remaining path, sink first, current holder last.
    pub route: Route,
}

impl ActiveRoute {
    pub fn new(origin: NodeId, route: Route) -> Self {
        Self { origin, route }
    }

    pub fn holder(&self) -> Option<NodeId> {
        self.route.holder()
    }

    pub fn next_hop(&self) -> Option<NodeId> {
        self.route.next_hop()
    }
}

/// Per-node FIFO queues of messages, keyed by current holder.
///
/// A node's queue length is its buffer occupancy.  The sink's queue is
/// always empty: delivered messages leave the plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePlan {
    queues: Vec<VecDeque<ActiveRoute>>,
}

impl RoutePlan {
    /// An empty plan for `node_count` nodes.
    pub fn new(node_count: usize) -> Self {
        Self { queues: vec![VecDeque::new(); node_count] }
    }

    pub fn node_count(&self) -> usize {
        self.queues.len()
    }

    /// Enqueue `message` at the back of `holder`'s queue.
    ///
    /// # Panics
    /// Panics if `holder` is outside the plan.
    pub fn push(&mut self, holder: NodeId, message: ActiveRoute) {
        self.queues[holder.index()].push_back(message);
    }

    /// The message `node` would send next.
    pub fn front(&self, node: NodeId) -> Option<&ActiveRoute> {
        self.queues.get(node.index()).and_then(VecDeque::front)
    }

    pub fn pop_front(&mut self, node: NodeId) -> Option<ActiveRoute> {
        self.queues.get_mut(node.index()).and_then(VecDeque::pop_front)
    }

    /// Messages currently held by `node`.
    pub fn pending(&self, node: NodeId) -> usize {
        self.queues.get(node.index()).map_or(0, VecDeque::len)
    }

    pub fn total_pending(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    pub fn queue(&self, node: NodeId) -> impl Iterator<Item = &ActiveRoute> + '_ {
        self.queues.get(node.index()).into_iter().flatten()
    }

    /// Per-node pending counts, the buffer vector this plan represents.
    pub fn buffers(&self) -> Vec<u32> {
        self.queues.iter().map(|q| q.len() as u32).collect()
    }
}
