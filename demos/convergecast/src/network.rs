//! Hand-built 9-node sensor field.
//!
//! | Relay | Leaves |
//! |-------|--------|
//! | 1     | 5, 7   |
//! | 2     | 5, 6   |
//! | 3     | 6, 8   |
//! | 4     | 7, 8   |
//!
//! Four relays around the sink, four leaves each reachable through two
//! relays, so balanced routing has alternatives to spread load over.

use wsn_core::NodeId;
use wsn_topology::{Topology, TopologyBuilder, TopologyResult};

pub const NODE_COUNT: usize = 9;

const LINKS: [(u32, u32); 12] = [
    (0, 1), (0, 2), (0, 3), (0, 4),
    (1, 5), (1, 7),
    (2, 5), (2, 6),
    (3, 6), (3, 8),
    (4, 7), (4, 8),
];

pub fn build_network() -> TopologyResult<Topology> {
    let mut b = TopologyBuilder::with_nodes(NODE_COUNT);
    for (a, c) in LINKS {
        b.add_link(NodeId(a), NodeId(c));
    }
    b.build()
}
