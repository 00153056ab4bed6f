//! Sensor network graph and builder.
//!
//! # Data layout
//!
//! Links are undirected but stored as two directed edges in **Compressed
//! Sparse Row (CSR)** format.  Given a `NodeId n`, its outgoing edges occupy
//! the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edges of one node are sorted by destination, so neighbor iteration is in
//! ascending `NodeId` order.  Link existence is fixed once built; only
//! `edge_weight` changes, and always symmetrically.
//!
//! # Validation
//!
//! Every constructor rejects input that would make schedule construction
//! impossible: a non-square or asymmetric matrix, self-loops, an empty
//! network, or any node unreachable from the sink.

use std::collections::VecDeque;

use wsn_core::{NodeId, SINK};

use crate::{TopologyError, TopologyResult};

/// Initial weight of every link.
pub const DEFAULT_WEIGHT: f64 = 1.0;

// ── Topology ──────────────────────────────────────────────────────────────────

/// Undirected interference graph with mutable, symmetric link weights.
///
/// Weights are only used to compare path costs; neighbor relations (and
/// therefore interference) never change.  Clone it to give independent
/// simulation runs their own weight state.
#[derive(Clone, Debug)]
pub struct Topology {
    /// CSR row pointer.  Length = `node_count + 1`.
    node_out_start: Vec<u32>,
    /// Destination node of each directed edge.
    edge_to: Vec<NodeId>,
    /// Current weight of each directed edge.
    edge_weight: Vec<f64>,
}

impl Topology {
    /// Build from a square, symmetric boolean adjacency matrix.
    ///
    /// Node `0` is the sink.  The diagonal must be all `false`.
    pub fn from_adjacency(matrix: &[Vec<bool>]) -> TopologyResult<Self> {
        let n = matrix.len();
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != n {
                return Err(TopologyError::InvalidTopology(format!(
                    "matrix is not square: row {i} has {} columns, expected {n}",
                    row.len()
                )));
            }
        }

        let mut b = TopologyBuilder::with_nodes(n);
        for i in 0..n {
            for j in i..n {
                if matrix[i][j] != matrix[j][i] {
                    return Err(TopologyError::InvalidTopology(format!(
                        "matrix is not symmetric at ({i}, {j})"
                    )));
                }
                if matrix[i][j] {
                    b.add_link(NodeId(i as u32), NodeId(j as u32));
                }
            }
        }
        b.build()
    }

    /// Build from `node_count` nodes and a list of undirected links.
    ///
    /// Duplicate links (in either orientation) are merged.
    pub fn from_edges(node_count: usize, links: &[(NodeId, NodeId)]) -> TopologyResult<Self> {
        let mut b = TopologyBuilder::with_nodes(node_count);
        for &(a, c) in links {
            b.add_link(a, c);
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_out_start.len() - 1
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// All node ids in ascending order, sink first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count() as u32).map(NodeId)
    }

    // ── Neighbor queries ──────────────────────────────────────────────────

    #[inline]
    fn edge_range(&self, node: NodeId) -> std::ops::Range<usize> {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    /// Neighbors of `node` in ascending id order.
    ///
    /// # Panics
    /// Panics if `node` is not in the topology.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edge_to[self.edge_range(node)].iter().copied()
    }

    /// `(neighbor, weight)` pairs for the outgoing edges of `node`.
    #[inline]
    pub(crate) fn weighted_neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        let range = self.edge_range(node);
        self.edge_to[range.clone()]
            .iter()
            .copied()
            .zip(self.edge_weight[range].iter().copied())
    }

    /// # Panics
    /// Panics if `node` is not in the topology.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.edge_range(node).len()
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.find_edge(a, b).is_some()
    }

    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<usize> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        let range = self.edge_range(from);
        let start = range.start;
        self.edge_to[range].binary_search(&to).ok().map(|i| start + i)
    }

    // ── Weights ───────────────────────────────────────────────────────────

    /// Current weight of link `(a, b)`, or `None` if they are not adjacent.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.find_edge(a, b).map(|e| self.edge_weight[e])
    }

    /// Increase the weight of link `(a, b)` by `delta` in both directions.
    pub fn adjust_weight(&mut self, a: NodeId, b: NodeId, delta: f64) -> TopologyResult<()> {
        if !delta.is_finite() || delta < 0.0 {
            return Err(TopologyError::InvalidWeightDelta(delta));
        }
        let forward  = self.find_edge(a, b).ok_or(TopologyError::EdgeNotFound(a, b))?;
        let backward = self.find_edge(b, a).ok_or(TopologyError::EdgeNotFound(b, a))?;
        self.edge_weight[forward]  += delta;
        self.edge_weight[backward] += delta;
        Ok(())
    }

    /// Restore every link to [`DEFAULT_WEIGHT`].
    pub fn reset_weights(&mut self) {
        self.edge_weight.fill(DEFAULT_WEIGHT);
    }

    /// Dense adjacency matrix, for presentation layers.
    pub fn to_adjacency(&self) -> Vec<Vec<bool>> {
        let n = self.node_count();
        let mut m = vec![vec![false; n]; n];
        for a in self.nodes() {
            for b in self.neighbors(a) {
                m[a.index()][b.index()] = true;
            }
        }
        m
    }
}

// ── TopologyBuilder ───────────────────────────────────────────────────────────

/// Construct a [`Topology`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use wsn_core::SINK;
/// use wsn_topology::TopologyBuilder;
///
/// let mut b = TopologyBuilder::new();
/// let sink = b.add_node();
/// let a = b.add_node();
/// b.add_link(sink, a);
/// let topo = b.build().unwrap();
/// assert_eq!(sink, SINK);
/// assert_eq!(topo.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct TopologyBuilder {
    node_count: usize,
    links:      Vec<(NodeId, NodeId)>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `n` nodes already allocated (ids `0..n`).
    pub fn with_nodes(n: usize) -> Self {
        Self { node_count: n, links: Vec::new() }
    }

    /// Add a node and return its `NodeId` (sequential from 0; the first is the sink).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add an undirected link.  Validation is deferred to `build()`.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        self.links.push((a, b));
    }

    pub fn node_count(&self) -> usize { self.node_count }

    /// Validate and produce a [`Topology`].
    pub fn build(self) -> TopologyResult<Topology> {
        let n = self.node_count;
        if n == 0 {
            return Err(TopologyError::InvalidTopology("network has no nodes".into()));
        }

        let mut directed: Vec<(NodeId, NodeId)> = Vec::with_capacity(self.links.len() * 2);
        for (a, b) in self.links {
            if a.index() >= n || b.index() >= n {
                return Err(TopologyError::InvalidTopology(format!(
                    "link ({a}, {b}) references a node outside [0, {n})"
                )));
            }
            if a == b {
                return Err(TopologyError::InvalidTopology(format!("self-loop at {a}")));
            }
            directed.push((a, b));
            directed.push((b, a));
        }
        directed.sort_unstable();
        directed.dedup();

        let edge_to: Vec<NodeId> = directed.iter().map(|&(_, to)| to).collect();

        let mut node_out_start = vec![0u32; n + 1];
        for &(from, _) in &directed {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=n {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[n] as usize, edge_to.len());

        let topo = Topology {
            node_out_start,
            edge_weight: vec![DEFAULT_WEIGHT; edge_to.len()],
            edge_to,
        };

        if let Some(stranded) = first_unreachable(&topo) {
            return Err(TopologyError::InvalidTopology(format!(
                "{stranded} is unreachable from the sink"
            )));
        }
        Ok(topo)
    }
}

/// Breadth-first search from the sink; the lowest unreached node, if any.
fn first_unreachable(topo: &Topology) -> Option<NodeId> {
    let mut seen = vec![false; topo.node_count()];
    let mut queue = VecDeque::from([SINK]);
    seen[SINK.index()] = true;
    while let Some(node) = queue.pop_front() {
        for next in topo.neighbors(node) {
            if !seen[next.index()] {
                seen[next.index()] = true;
                queue.push_back(next);
            }
        }
    }
    seen.iter().position(|&s| !s).map(|i| NodeId(i as u32))
}
