//! Shortest-path queries over a [`Topology`].
//!
//! # Tie-breaking
//!
//! Dijkstra pops `(cost, NodeId)` pairs in ascending order and only relaxes
//! an edge on a strictly smaller cost.  Among equal-cost paths the one whose
//! predecessor is settled first wins, which means the lowest node id at each
//! tie.  Callers must not rely on more than "some shortest path", but the
//! choice is stable across runs.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use wsn_core::NodeId;

use crate::network::Topology;
use crate::{TopologyError, TopologyResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// A path through the network, stored source-first.
///
/// Routes toward the sink are computed *from* the sink, so `nodes[0]` is the
/// sink and the last element is the message's current holder.  Forwarding a
/// message one hop pops the last element; once only the sink remains the
/// message has been delivered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    nodes: Vec<NodeId>,
    cost:  f64,
}

impl Route {
    pub fn new(nodes: Vec<NodeId>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Path cost under the weights in effect when the route was computed.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// First node (the sink for convergecast routes).
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Current holder: the far end of the remaining path.
    pub fn holder(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// The node the holder forwards to next, if any hops remain.
    pub fn next_hop(&self) -> Option<NodeId> {
        let len = self.nodes.len();
        (len >= 2).then(|| self.nodes[len - 2])
    }

    /// Remaining hop count.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// `true` once the path has shrunk to its source alone.
    pub fn is_complete(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Drop the holder; the next hop becomes the new holder.
    ///
    /// Returns the new holder, or `None` if the route was already complete.
    pub fn advance(&mut self) -> Option<NodeId> {
        if self.is_complete() {
            return None;
        }
        self.nodes.pop();
        self.holder()
    }

    /// Consecutive `(near, far)` pairs, source side first.
    pub fn links(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Path cost with a total order so it can key a `BinaryHeap`.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Result of a single-source search: `dist[v]` and the predecessor of `v`.
struct SearchTree {
    dist: Vec<f64>,
    prev: Vec<Option<NodeId>>,
}

/// Single-source Dijkstra.  Stops early once `stop_at` is settled.
fn dijkstra(topo: &Topology, from: NodeId, stop_at: Option<NodeId>) -> SearchTree {
    let n = topo.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![None; n];
    dist[from.index()] = 0.0;

    // Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        if Some(node) == stop_at {
            break;
        }

        for (neighbor, weight) in topo.weighted_neighbors(node) {
            let new_cost = cost + weight;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = Some(node);
                heap.push(Reverse((Cost(new_cost), neighbor)));
            }
        }
    }

    SearchTree { dist, prev }
}

fn reconstruct(tree: &SearchTree, from: NodeId, to: NodeId) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        match tree.prev[cur.index()] {
            Some(p) => {
                nodes.push(p);
                cur = p;
            }
            None => break,
        }
    }
    nodes.reverse();
    Route::new(nodes, tree.dist[to.index()])
}

// ── Public queries ────────────────────────────────────────────────────────────

impl Topology {
    fn check(&self, node: NodeId) -> TopologyResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(TopologyError::NodeNotFound(node))
        }
    }

    /// Cheapest path from `from` to `to` under the current weights.
    ///
    /// `from == to` yields a single-node route of cost 0.
    pub fn shortest_path(&self, from: NodeId, to: NodeId) -> TopologyResult<Route> {
        self.check(from)?;
        self.check(to)?;
        let tree = dijkstra(self, from, Some(to));
        if tree.dist[to.index()].is_infinite() {
            return Err(TopologyError::NoRoute { from, to });
        }
        Ok(reconstruct(&tree, from, to))
    }

    /// Cost from `from` to every node (`f64::INFINITY` where unreachable).
    pub fn distances_from(&self, from: NodeId) -> TopologyResult<Vec<f64>> {
        self.check(from)?;
        Ok(dijkstra(self, from, None).dist)
    }

    /// One shortest path from `from` to every node, indexed by destination.
    ///
    /// All routes share the same search tree, so they are mutually
    /// consistent (a prefix of one route is the route to that prefix's end).
    pub fn shortest_path_tree(&self, from: NodeId) -> TopologyResult<Vec<Route>> {
        self.check(from)?;
        let tree = dijkstra(self, from, None);
        self.nodes()
            .map(|to| {
                if tree.dist[to.index()].is_infinite() {
                    Err(TopologyError::NoRoute { from, to })
                } else {
                    Ok(reconstruct(&tree, from, to))
                }
            })
            .collect()
    }

    /// Node ids sorted by ascending distance from `from`; ties by id.
    pub fn nodes_by_distance(&self, from: NodeId) -> TopologyResult<Vec<NodeId>> {
        let dist = self.distances_from(from)?;
        let mut order: Vec<NodeId> = self.nodes().collect();
        order.sort_by(|a, b| {
            Cost(dist[a.index()])
                .cmp(&Cost(dist[b.index()]))
                .then(a.cmp(b))
        });
        Ok(order)
    }
}
