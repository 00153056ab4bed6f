//! Route builder: one `ActiveRoute` per pending message.

use tracing::debug;

use wsn_core::{NodeId, RoutingMode, SINK};
use wsn_topology::Topology;

use crate::{ActiveRoute, RoutePlan, RoutingError, RoutingResult};

/// The default single-shot snapshot: one message at every non-sink node.
pub fn one_per_node(node_count: usize) -> Vec<u32> {
    let mut buffers = vec![1; node_count];
    if let Some(sink) = buffers.first_mut() {
        *sink = 0;
    }
    buffers
}

/// Computes routes for every message in a buffer snapshot.
///
/// `buffers[i]` is the number of messages node `i` holds; the sink's entry
/// is ignored.  Each message is tagged with its holder as origin.
#[derive(Copy, Clone, Debug, Default)]
pub struct RouteBuilder {
    pub mode: RoutingMode,
}

impl RouteBuilder {
    pub fn new(mode: RoutingMode) -> Self {
        Self { mode }
    }

    /// Build a [`RoutePlan`] for `buffers`.
    ///
    /// In balanced mode this raises link weights in `topology`; the caller
    /// owns that state and decides whether to keep or reset it.
    pub fn build(&self, topology: &mut Topology, buffers: &[u32]) -> RoutingResult<RoutePlan> {
        if buffers.len() != topology.node_count() {
            return Err(RoutingError::BufferLengthMismatch {
                expected: topology.node_count(),
                got:      buffers.len(),
            });
        }
        let plan = match self.mode {
            RoutingMode::Unbalanced => unbalanced(topology, buffers)?,
            RoutingMode::Balanced   => balanced(topology, buffers)?,
        };
        debug!(
            mode = %self.mode,
            messages = plan.total_pending(),
            "route plan built"
        );
        Ok(plan)
    }
}

fn unbalanced(topology: &Topology, buffers: &[u32]) -> RoutingResult<RoutePlan> {
    let templates = topology.shortest_path_tree(SINK)?;
    let mut plan = RoutePlan::new(topology.node_count());
    for (node, template) in topology.nodes().zip(&templates).skip(1) {
        for _ in 0..buffers[node.index()] {
            plan.push(node, ActiveRoute::new(node, template.clone()));
        }
    }
    Ok(plan)
}

fn balanced(topology: &mut Topology, buffers: &[u32]) -> RoutingResult<RoutePlan> {
    let n = topology.node_count();
    let penalty_scale = 1.0 / (n * n) as f64;
    let order = topology.nodes_by_distance(SINK)?;

    // Number of routes built so far that pass through each node.
    let mut load = vec![0u32; n];
    let mut plan = RoutePlan::new(n);

    for node in order.into_iter().filter(|n| !n.is_sink()) {
        for _ in 0..buffers[node.index()] {
            let route = topology.shortest_path(SINK, node)?;
            for &hop in route.nodes() {
                load[hop.index()] += 1;
            }
            load[SINK.index()] = 0;

            let links: Vec<(NodeId, NodeId)> = route.links().collect();
            for (near, far) in links {
                let delta = load[far.index()] as f64 * penalty_scale;
                topology.adjust_weight(near, far, delta)?;
            }
            plan.push(node, ActiveRoute::new(node, route));
        }
    }
    Ok(plan)
}
