//! Schedule data: transmissions grouped into slots grouped into frames.

use wsn_core::NodeId;
use wsn_topology::Topology;

/// One hop of one message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transmission {
    pub sender:   NodeId,
    pub receiver: NodeId,
}

impl Transmission {
    pub fn new(sender: NodeId, receiver: NodeId) -> Self {
        Self { sender, receiver }
    }
}

impl std::fmt::Display for Transmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.sender.0, self.receiver.0)
    }
}

// ── Slot ──────────────────────────────────────────────────────────────────────

/// Transmissions that happen in the same time unit.
///
/// Order inside a slot is the order the scheduler assigned them and carries
/// no meaning for the radio.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub transmissions: Vec<Transmission>,
}

impl Slot {
    pub fn len(&self) -> usize {
        self.transmissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transmissions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transmission> + '_ {
        self.transmissions.iter()
    }

    /// Brute-force pairwise check against `topology`.
    ///
    /// A slot is interference-free when every transmission runs over an
    /// existing link from a non-sink sender, no node takes part in two
    /// transmissions, and no receiver is adjacent to another transmission's
    /// sender.
    pub fn is_interference_free(&self, topology: &Topology) -> bool {
        let txs = &self.transmissions;
        if txs
            .iter()
            .any(|t| t.sender.is_sink() || !topology.has_edge(t.sender, t.receiver))
        {
            return false;
        }
        for (i, a) in txs.iter().enumerate() {
            for b in &txs[i + 1..] {
                let shares_node = [a.sender, a.receiver]
                    .iter()
                    .any(|n| *n == b.sender || *n == b.receiver);
                if shares_node
                    || topology.has_edge(a.sender, b.receiver)
                    || topology.has_edge(b.sender, a.receiver)
                {
                    return false;
                }
            }
        }
        true
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Ordered slots produced by one scheduler invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub slots: Vec<Slot>,
}

impl Frame {
    /// Frame length in slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn transmission_count(&self) -> usize {
        self.slots.iter().map(Slot::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.iter()
    }

    pub fn is_interference_free(&self, topology: &Topology) -> bool {
        self.slots.iter().all(|s| s.is_interference_free(topology))
    }
}
