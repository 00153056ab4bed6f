//! The greedy slot scheduler.
//!
//! `Scheduler` is a small state machine: each [`build_slot`](Scheduler::build_slot)
//! call performs one pass over the nodes and commits whatever transmissions
//! it could fit; [`run`](Scheduler::run) keeps building slots until the
//! buffers are drained (or a horizon is reached) and returns the frame.
//!
//! Every slot with at least one transmission moves a message one hop closer
//! to the sink, and the first node visited with a message always gets to
//! send, so a consistent plan always drains.  A pass that sends nothing
//! while messages remain means the route plan disagrees with the topology
//! and is reported as [`SchedulingError::SchedulingDeadlock`].

use tracing::{debug, trace, warn};

use wsn_core::{NodeId, RoutingMode, SINK};
use wsn_routing::{RouteBuilder, RoutePlan};
use wsn_topology::Topology;

use crate::{Frame, SchedulingError, SchedulingResult, Slot, Transmission};

// ── FrameReport ───────────────────────────────────────────────────────────────

/// Outcome of one scheduler invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: Frame,
    /// Messages that reached the sink, indexed by origin node.
    pub delivered_by_origin: Vec<u32>,
    /// Buffer vector after the last slot.  The sink entry counts
    /// everything it has received on top of its starting value.
    pub final_buffers: Vec<u32>,
    /// `false` if a slot horizon stopped the frame before it drained.
    pub complete: bool,
}

impl FrameReport {
    pub fn total_delivered(&self) -> u64 {
        self.delivered_by_origin.iter().map(|&d| d as u64).sum()
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Builds one frame from a topology, a route plan, and a buffer vector.
pub struct Scheduler<'t> {
    topology:        &'t Topology,
    /// Non-sink nodes in visit order (ascending distance to sink).
    order:           Vec<NodeId>,
    plan:            RoutePlan,
    buffers:         Vec<u32>,
    delivered:       Vec<u32>,
    transmit_locked: Vec<bool>,
    receive_locked:  Vec<bool>,
    slots:           Vec<Slot>,
}

impl<'t> Scheduler<'t> {
    /// Create a scheduler for `plan`, checking it against `buffers`.
    ///
    /// Every non-sink node must hold exactly as many routes as its buffer
    /// count.  The visit order is fixed here from the topology's current
    /// weights.
    pub fn new(
        topology: &'t Topology,
        plan:     RoutePlan,
        buffers:  Vec<u32>,
    ) -> SchedulingResult<Self> {
        let n = topology.node_count();
        if buffers.len() != n {
            return Err(SchedulingError::NodeCountMismatch { expected: n, got: buffers.len(), what: "buffer vector" });
        }
        if plan.node_count() != n {
            return Err(SchedulingError::NodeCountMismatch { expected: n, got: plan.node_count(), what: "route plan" });
        }
        for node in topology.nodes().skip(1) {
            let buffered = buffers[node.index()];
            let routed = plan.pending(node);
            if buffered as usize != routed {
                return Err(SchedulingError::InconsistentRoutes { node, buffered, routed });
            }
        }

        let order = topology
            .nodes_by_distance(SINK)?
            .into_iter()
            .filter(|node| !node.is_sink())
            .collect();

        Ok(Self {
            topology,
            order,
            plan,
            buffers,
            delivered:       vec![0; n],
            transmit_locked: vec![false; n],
            receive_locked:  vec![false; n],
            slots:           Vec::new(),
        })
    }

    /// Create a scheduler whose buffer vector is read off `plan`.
    pub fn from_plan(topology: &'t Topology, plan: RoutePlan) -> SchedulingResult<Self> {
        let buffers = plan.buffers();
        Self::new(topology, plan, buffers)
    }

    /// `true` once every non-sink buffer is empty.
    pub fn is_drained(&self) -> bool {
        self.buffers.iter().skip(1).all(|&b| b == 0)
    }

    pub fn buffers(&self) -> &[u32] {
        &self.buffers
    }

    pub fn slots_built(&self) -> usize {
        self.slots.len()
    }

    /// Build and record one slot.
    ///
    /// Returns a copy of the slot just appended to the frame.
    pub fn build_slot(&mut self) -> SchedulingResult<Slot> {
        self.transmit_locked.fill(false);
        self.receive_locked.fill(false);

        let mut slot = Slot::default();
        for i in 0..self.order.len() {
            let node = self.order[i];
            if let Some(tx) = self.try_send(node) {
                slot.transmissions.push(tx);
            }
        }

        if slot.is_empty() && !self.is_drained() {
            let stranded: Vec<NodeId> = self
                .topology
                .nodes()
                .skip(1)
                .filter(|n| self.buffers[n.index()] > 0)
                .collect();
            warn!(slot = self.slots.len(), ?stranded, "scheduling deadlock");
            return Err(SchedulingError::SchedulingDeadlock {
                slot:    self.slots.len(),
                buffers: self.buffers.clone(),
                stranded,
            });
        }

        debug_assert!(slot.is_interference_free(self.topology));
        trace!(slot = self.slots.len(), transmissions = slot.len(), "slot built");
        self.slots.push(slot.clone());
        Ok(slot)
    }

    /// Send `node`'s head-of-line message if the locks allow it.
    fn try_send(&mut self, node: NodeId) -> Option<Transmission> {
        if self.buffers[node.index()] == 0 {
            return None;
        }
        let receiver = self.plan.front(node)?.next_hop()?;
        if self.transmit_locked[node.index()]
            || self.receive_locked[receiver.index()]
            || !self.topology.has_edge(node, receiver)
        {
            return None;
        }

        let mut message = self.plan.pop_front(node)?;
        message.route.advance();
        self.buffers[node.index()] -= 1;
        self.buffers[receiver.index()] += 1;
        if message.route.is_complete() {
            self.delivered[message.origin.index()] += 1;
        } else {
            self.plan.push(receiver, message);
        }

        // Neither the sender nor anyone who can hear it may receive now.
        self.receive_locked[node.index()] = true;
        for n in self.topology.neighbors(node) {
            self.receive_locked[n.index()] = true;
        }
        // Neither the receiver nor anyone it can hear may transmit now.
        self.transmit_locked[receiver.index()] = true;
        for n in self.topology.neighbors(receiver) {
            self.transmit_locked[n.index()] = true;
        }

        Some(Transmission::new(node, receiver))
    }

    /// Build slots until every non-sink buffer is empty.
    pub fn run(self) -> SchedulingResult<FrameReport> {
        self.run_bounded(None)
    }

    /// Build at most `max_slots` slots, stopping early if the buffers drain.
    pub fn run_until(self, max_slots: usize) -> SchedulingResult<FrameReport> {
        self.run_bounded(Some(max_slots))
    }

    fn run_bounded(mut self, max_slots: Option<usize>) -> SchedulingResult<FrameReport> {
        while !self.is_drained() {
            if max_slots.is_some_and(|max| self.slots.len() >= max) {
                break;
            }
            self.build_slot()?;
        }

        let complete = self.is_drained();
        let frame = Frame { slots: self.slots };
        debug!(
            slots = frame.len(),
            transmissions = frame.transmission_count(),
            complete,
            "frame built"
        );
        Ok(FrameReport {
            frame,
            delivered_by_origin: self.delivered,
            final_buffers:       self.buffers,
            complete,
        })
    }
}

/// Route `buffers` with `mode`, then schedule until drained.
///
/// A pure function of the topology (including its current weights) and the
/// snapshot, apart from the weight updates balanced routing makes.
pub fn schedule_snapshot(
    topology: &mut Topology,
    mode:     RoutingMode,
    buffers:  &[u32],
) -> SchedulingResult<FrameReport> {
    let plan = RouteBuilder::new(mode).build(topology, buffers)?;
    Scheduler::new(topology, plan, buffers.to_vec())?.run()
}
