//! Fluent builder for constructing a [`BufferSim`].

use rand_distr::Binomial;
use tracing::info;

use wsn_core::{SimConfig, SimRng, WsnError, SINK};
use wsn_routing::one_per_node;
use wsn_schedule::schedule_snapshot;
use wsn_topology::Topology;

use crate::sim::Arrivals;
use crate::{BufferSim, SimResult};

/// Fluent builder for [`BufferSim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: arrival probability, horizon, adaptation period, seed
/// - [`Topology`]: owned by the simulator for the whole run
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                              |
/// |------------------------|--------------------------------------|
/// | `.initial_buffers(v)`  | One message at every non-sink node   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = BufferSimBuilder::new(config, topology)
///     .initial_buffers(vec![0, 2, 0, 1])
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct BufferSimBuilder {
    config:   SimConfig,
    topology: Topology,
    initial:  Option<Vec<u32>>,
}

impl BufferSimBuilder {
    pub fn new(config: SimConfig, topology: Topology) -> Self {
        Self { config, topology, initial: None }
    }

    /// Backlog present before the first frame (length = node count).
    ///
    /// The first frame is scheduled from this snapshot.  The sink's entry is
    /// ignored.
    pub fn initial_buffers(mut self, buffers: Vec<u32>) -> Self {
        self.initial = Some(buffers);
        self
    }

    /// Validate inputs, build the template and initial frames, and return a
    /// ready-to-run [`BufferSim`].
    pub fn build(self) -> SimResult<BufferSim> {
        self.config.validate()?;
        let mut topology = self.topology;
        let n = topology.node_count();

        let mut initial = match self.initial {
            Some(b) => {
                if b.len() != n {
                    return Err(WsnError::InvalidParameter {
                        name:   "initial_buffers",
                        reason: format!("{} entries for {n} nodes", b.len()),
                    }
                    .into());
                }
                b
            }
            None => one_per_node(n),
        };
        initial[SINK.index()] = 0;

        let arrivals = if self.config.max_arrivals_per_slot == 1 {
            Arrivals::Bernoulli(self.config.arrival_probability)
        } else {
            let dist = Binomial::new(
                self.config.max_arrivals_per_slot as u64,
                self.config.arrival_probability,
            )
            .map_err(|e| WsnError::InvalidParameter {
                name:   "arrival_probability",
                reason: e.to_string(),
            })?;
            Arrivals::Binomial(dist)
        };

        // Fallback schedule for snapshots with nothing pending.
        let template = schedule_snapshot(&mut topology, self.config.routing, &one_per_node(n))?.frame;
        let first = schedule_snapshot(&mut topology, self.config.routing, &initial)?.frame;
        let frame = if first.is_empty() { template.clone() } else { first };

        info!(
            nodes = n,
            links = topology.edge_count(),
            frame_slots = frame.len(),
            routing = %self.config.routing,
            p = self.config.arrival_probability,
            num_frames = self.config.num_frames,
            adaptation = self.config.adaptation,
            "buffer simulator ready"
        );

        Ok(BufferSim {
            rng:            SimRng::new(self.config.seed),
            config:         self.config,
            topology,
            arrivals,
            frame,
            template,
            incoming:       vec![0; n],
            outgoing:       initial,
            current_frame:  0,
            occupancy_sum:  0,
            per_node_sum:   vec![0; n],
            delivered:      0,
            arrived:        0,
            idle:           0,
            slots_run:      0,
            adaptations:    0,
            overloaded:     0,
            longest_frame:  0,
        })
    }
}
