//! Strongly typed node identifier.
//!
//! Nodes are dense indices in `[0, N)`.  The inner integer is `pub` so it can
//! index per-node `Vec`s directly, but callers should prefer
//! [`NodeId::index`] for clarity.

use std::fmt;

/// Index of a sensor node.  Node `0` is always the sink.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

/// The base station.  Never transmits; every route ends here.
pub const SINK: NodeId = NodeId(0);

impl NodeId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_sink(self) -> bool {
        self == SINK
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeId, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}
