//! Independent Monte Carlo replications for variance reduction.
//!
//! Every replication gets its own clone of the topology (so balanced
//! routing's weight updates never leak between runs) and its own seed.
//! With the `parallel` feature the runs execute on Rayon; results are
//! returned in seed order either way.

use wsn_core::SimConfig;
use wsn_topology::Topology;

use crate::{BufferSimBuilder, NoopObserver, SimReport, SimResult};

fn replicate_one(config: &SimConfig, topology: &Topology, seed: u64) -> SimResult<SimReport> {
    let config = SimConfig { seed, ..config.clone() };
    let mut sim = BufferSimBuilder::new(config, topology.clone()).build()?;
    sim.run(&mut NoopObserver)
}

/// Run one simulation per seed and collect their reports.
///
/// The first failing replication's error is returned; partial results are
/// discarded.
pub fn run_replications(
    config:   &SimConfig,
    topology: &Topology,
    seeds:    &[u64],
) -> SimResult<Vec<SimReport>> {
    #[cfg(not(feature = "parallel"))]
    {
        seeds
            .iter()
            .map(|&seed| replicate_one(config, topology, seed))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        seeds
            .par_iter()
            .map(|&seed| replicate_one(config, topology, seed))
            .collect()
    }
}

/// Mean and sample standard deviation of `mean_occupancy` across runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplicationSummary {
    pub runs:     usize,
    pub mean:     f64,
    pub std_dev:  f64,
}

impl ReplicationSummary {
    pub fn from_reports(reports: &[SimReport]) -> Self {
        let runs = reports.len();
        if runs == 0 {
            return Self { runs, mean: 0.0, std_dev: 0.0 };
        }
        let mean = reports.iter().map(|r| r.mean_occupancy).sum::<f64>() / runs as f64;
        let std_dev = if runs < 2 {
            0.0
        } else {
            let var = reports
                .iter()
                .map(|r| (r.mean_occupancy - mean).powi(2))
                .sum::<f64>()
                / (runs - 1) as f64;
            var.sqrt()
        };
        Self { runs, mean, std_dev }
    }
}
