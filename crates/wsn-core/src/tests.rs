//! Unit tests for wsn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{NodeId, SINK};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn sink_is_zero() {
        assert_eq!(SINK, NodeId(0));
        assert!(SINK.is_sink());
        assert!(!NodeId(1).is_sink());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod config {
    use crate::{RoutingMode, SimConfig, WsnError};

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        for p in [-0.1, 1.5, f64::NAN] {
            let cfg = SimConfig { arrival_probability: p, ..SimConfig::default() };
            assert!(
                matches!(cfg.validate(), Err(WsnError::InvalidParameter { name: "arrival_probability", .. })),
                "p = {p} should be rejected"
            );
        }
    }

    #[test]
    fn probability_bounds_accepted() {
        for p in [0.0, 1.0] {
            let cfg = SimConfig { arrival_probability: p, ..SimConfig::default() };
            assert!(cfg.validate().is_ok());
        }
    }

    #[test]
    fn zero_horizon_rejected() {
        let cfg = SimConfig { num_frames: 0, ..SimConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(WsnError::InvalidParameter { name: "num_frames", .. })
        ));
    }

    #[test]
    fn zero_trials_rejected() {
        let cfg = SimConfig { max_arrivals_per_slot: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn adaptation_period() {
        let off = SimConfig { adaptation: 0, ..SimConfig::default() };
        assert!(!off.adapts_after(0));
        assert!(!off.adapts_after(9));

        let every3 = SimConfig { adaptation: 3, ..SimConfig::default() };
        let hits: Vec<u64> = (0..9).filter(|&f| every3.adapts_after(f)).collect();
        assert_eq!(hits, vec![2, 5, 8]);
    }

    #[test]
    fn routing_mode_display() {
        assert_eq!(RoutingMode::Balanced.to_string(), "balanced");
        assert_eq!(RoutingMode::default(), RoutingMode::Unbalanced);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.random();
            let b: u64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut r0 = SimRng::new(1);
        let mut r1 = SimRng::new(2);
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
