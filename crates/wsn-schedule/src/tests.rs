//! Unit tests for wsn-schedule.

#[cfg(test)]
mod helpers {
    use wsn_core::NodeId;
    use wsn_topology::Topology;

    pub fn topo(n: u32, links: &[(u32, u32)]) -> Topology {
        let links: Vec<_> = links.iter().map(|&(a, b)| (NodeId(a), NodeId(b))).collect();
        Topology::from_edges(n as usize, &links).unwrap()
    }

    /// Sink 0 connected to 1, 2, 3 and nothing else.
    pub fn star() -> Topology {
        topo(4, &[(0, 1), (0, 2), (0, 3)])
    }

    /// 0 - 1 - 2 - 3
    pub fn path() -> Topology {
        topo(4, &[(0, 1), (1, 2), (2, 3)])
    }

    /// 3×3 grid, sink in the corner.
    ///
    /// ```text
    /// 0 - 1 - 2
    /// |   |   |
    /// 3 - 4 - 5
    /// |   |   |
    /// 6 - 7 - 8
    /// ```
    pub fn grid() -> Topology {
        topo(9, &[
            (0, 1), (1, 2), (3, 4), (4, 5), (6, 7), (7, 8),
            (0, 3), (3, 6), (1, 4), (4, 7), (2, 5), (5, 8),
        ])
    }

    pub fn tx(s: u32, r: u32) -> crate::Transmission {
        crate::Transmission::new(NodeId(s), NodeId(r))
    }
}

// ── Concrete scenarios ────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use wsn_core::RoutingMode;
    use crate::schedule_snapshot;
    use super::helpers::{path, star, topo, tx};

    #[test]
    fn star_needs_one_slot_per_leaf() {
        let mut t = star();
        let report = schedule_snapshot(&mut t, RoutingMode::Unbalanced, &[0, 1, 1, 1]).unwrap();
        let frame = &report.frame;
        assert_eq!(frame.len(), 3);
        assert!(frame.iter().all(|s| s.len() == 1));
        assert_eq!(frame.transmission_count(), 3);
        assert_eq!(report.total_delivered(), 3);
        assert_eq!(report.delivered_by_origin, vec![0, 1, 1, 1]);
        assert!(report.complete);
    }

    #[test]
    fn star_slots_in_node_order() {
        let mut t = star();
        let report = schedule_snapshot(&mut t, RoutingMode::Unbalanced, &[0, 1, 1, 1]).unwrap();
        let sent: Vec<_> = report.frame.iter().map(|s| s.transmissions[0]).collect();
        assert_eq!(sent, vec![tx(1, 0), tx(2, 0), tx(3, 0)]);
    }

    #[test]
    fn path_serializes_every_hop() {
        // Any two transmissions on a 4-node path conflict, so the six hops
        // (1 + 2 + 3) take six slots.
        let mut t = path();
        let report = schedule_snapshot(&mut t, RoutingMode::Unbalanced, &[0, 1, 1, 1]).unwrap();
        let sent: Vec<_> = report
            .frame
            .iter()
            .map(|s| {
                assert_eq!(s.len(), 1);
                s.transmissions[0]
            })
            .collect();
        assert_eq!(
            sent,
            vec![tx(1, 0), tx(2, 1), tx(1, 0), tx(3, 2), tx(2, 1), tx(1, 0)]
        );
        assert_eq!(report.delivered_by_origin, vec![0, 1, 1, 1]);
    }

    #[test]
    fn independent_branches_share_slots() {
        // 0 - 1 - 2 and 0 - 3 - 4: the two far ends can forward together.
        let mut t = topo(5, &[(0, 1), (1, 2), (0, 3), (3, 4)]);
        let report = schedule_snapshot(&mut t, RoutingMode::Unbalanced, &[0, 0, 1, 0, 1]).unwrap();
        let frame = &report.frame;
        assert_eq!(frame.slots[0].transmissions, vec![tx(2, 1), tx(4, 3)]);
        // Both branches then converge on the sink, one at a time.
        assert_eq!(frame.len(), 3);
        assert_eq!(report.total_delivered(), 2);
    }

    #[test]
    fn empty_snapshot_gives_empty_frame() {
        let mut t = star();
        let report = schedule_snapshot(&mut t, RoutingMode::Unbalanced, &[0, 0, 0, 0]).unwrap();
        assert!(report.frame.is_empty());
        assert!(report.complete);
    }

    #[test]
    fn sink_only_network() {
        let mut t = topo(1, &[]);
        let report = schedule_snapshot(&mut t, RoutingMode::Balanced, &[0]).unwrap();
        assert!(report.frame.is_empty());
    }
}

// ── Invariants over many snapshots ────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use wsn_core::{RoutingMode, SINK};
    use crate::schedule_snapshot;
    use super::helpers::grid;

    fn snapshots() -> Vec<Vec<u32>> {
        vec![
            vec![0, 1, 1, 1, 1, 1, 1, 1, 1],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 5],
            vec![0, 3, 0, 2, 4, 0, 1, 0, 2],
            vec![9, 1, 2, 3, 4, 5, 6, 7, 8],
        ]
    }

    #[test]
    fn drains_and_conserves_messages() {
        for mode in [RoutingMode::Unbalanced, RoutingMode::Balanced] {
            for buffers in snapshots() {
                let mut t = grid();
                let report = schedule_snapshot(&mut t, mode, &buffers).unwrap();
                let injected: u64 = buffers.iter().skip(1).map(|&b| b as u64).sum();

                assert!(report.complete);
                assert!(report.final_buffers.iter().skip(1).all(|&b| b == 0));
                assert_eq!(report.total_delivered(), injected);
                assert_eq!(
                    report.final_buffers[SINK.index()] as u64,
                    buffers[SINK.index()] as u64 + injected
                );
                // Each message is credited to the node that generated it.
                for (node, &b) in buffers.iter().enumerate().skip(1) {
                    assert_eq!(report.delivered_by_origin[node], b, "{mode} {buffers:?}");
                }
            }
        }
    }

    #[test]
    fn every_slot_interference_free() {
        for mode in [RoutingMode::Unbalanced, RoutingMode::Balanced] {
            for buffers in snapshots() {
                let mut t = grid();
                let report = schedule_snapshot(&mut t, mode, &buffers).unwrap();
                for (i, slot) in report.frame.iter().enumerate() {
                    assert!(!slot.is_empty(), "slot {i} empty");
                    assert!(slot.is_interference_free(&t), "slot {i}: {slot:?}");
                }
            }
        }
    }

    #[test]
    fn transmissions_equal_total_hops() {
        let mut t = grid();
        let buffers = vec![0, 1, 1, 1, 1, 1, 1, 1, 1];
        let dist = t.distances_from(SINK).unwrap();
        let hops: f64 = buffers
            .iter()
            .zip(&dist)
            .map(|(&b, &d)| b as f64 * d)
            .sum();
        let report = schedule_snapshot(&mut t, RoutingMode::Unbalanced, &buffers).unwrap();
        assert_eq!(report.frame.transmission_count() as f64, hops);
    }
}

// ── Scheduler state machine & failures ────────────────────────────────────────

#[cfg(test)]
mod state_machine {
    use wsn_core::{NodeId, RoutingMode};
    use wsn_routing::{ActiveRoute, RouteBuilder, RoutePlan};
    use wsn_topology::Route;
    use crate::{Scheduler, SchedulingError};
    use super::helpers::{path, star, tx};

    #[test]
    fn horizon_stops_early() {
        let mut t = path();
        let plan = RouteBuilder::new(RoutingMode::Unbalanced).build(&mut t, &[0, 1, 1, 1]).unwrap();
        let report = Scheduler::from_plan(&t, plan).unwrap().run_until(2).unwrap();
        assert_eq!(report.frame.len(), 2);
        assert!(!report.complete);
        assert_eq!(report.final_buffers, vec![1, 1, 0, 1]);
    }

    #[test]
    fn horizon_longer_than_needed() {
        let mut t = star();
        let plan = RouteBuilder::default().build(&mut t, &[0, 1, 1, 1]).unwrap();
        let report = Scheduler::from_plan(&t, plan).unwrap().run_until(100).unwrap();
        assert_eq!(report.frame.len(), 3);
        assert!(report.complete);
    }

    #[test]
    fn stepwise_slots() {
        let mut t = star();
        let plan = RouteBuilder::default().build(&mut t, &[0, 1, 0, 1]).unwrap();
        let mut s = Scheduler::from_plan(&t, plan).unwrap();
        assert!(!s.is_drained());
        assert_eq!(s.build_slot().unwrap().transmissions, vec![tx(1, 0)]);
        assert_eq!(s.buffers(), &[1, 0, 0, 1]);
        assert_eq!(s.build_slot().unwrap().transmissions, vec![tx(3, 0)]);
        assert!(s.is_drained());
        assert_eq!(s.slots_built(), 2);
    }

    #[test]
    fn mismatched_buffers_rejected() {
        let mut t = star();
        let plan = RouteBuilder::default().build(&mut t, &[0, 1, 1, 1]).unwrap();
        let err = Scheduler::new(&t, plan, vec![0, 2, 1, 1]).err().unwrap();
        assert_eq!(
            err,
            SchedulingError::InconsistentRoutes { node: NodeId(1), buffered: 2, routed: 1 }
        );
    }

    #[test]
    fn wrong_length_rejected() {
        let t = star();
        let err = Scheduler::new(&t, RoutePlan::new(4), vec![0, 0]).err().unwrap();
        assert!(matches!(err, SchedulingError::NodeCountMismatch { got: 2, .. }));
    }

    #[test]
    fn broken_route_deadlocks() {
        // Node 1 claims to forward via node 2, but 1 and 2 are not adjacent.
        let t = star();
        let mut plan = RoutePlan::new(4);
        let bogus = Route::new(vec![NodeId(0), NodeId(2), NodeId(1)], 2.0);
        plan.push(NodeId(1), ActiveRoute::new(NodeId(1), bogus));
        let err = Scheduler::from_plan(&t, plan).unwrap().run().unwrap_err();
        match err {
            SchedulingError::SchedulingDeadlock { slot, buffers, stranded } => {
                assert_eq!(slot, 0);
                assert_eq!(buffers, vec![0, 1, 0, 0]);
                assert_eq!(stranded, vec![NodeId(1)]);
            }
            other => panic!("expected deadlock, got {other:?}"),
        }
    }
}

// ── Interference checker ──────────────────────────────────────────────────────

#[cfg(test)]
mod checker {
    use crate::Slot;
    use super::helpers::{grid, star, tx};

    #[test]
    fn detects_shared_receiver() {
        let slot = Slot { transmissions: vec![tx(1, 0), tx(2, 0)] };
        assert!(!slot.is_interference_free(&star()));
    }

    #[test]
    fn detects_hidden_terminal() {
        // Receiver 4 neighbors sender 1.
        let slot = Slot { transmissions: vec![tx(1, 0), tx(5, 4)] };
        assert!(!slot.is_interference_free(&grid()));
    }

    #[test]
    fn accepts_distant_pair() {
        let slot = Slot { transmissions: vec![tx(1, 0), tx(8, 7)] };
        assert!(slot.is_interference_free(&grid()));
    }

    #[test]
    fn rejects_sink_sender_and_non_links() {
        let g = grid();
        assert!(!Slot { transmissions: vec![tx(0, 1)] }.is_interference_free(&g));
        assert!(!Slot { transmissions: vec![tx(8, 0)] }.is_interference_free(&g));
    }
}
