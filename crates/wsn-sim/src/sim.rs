//! The `BufferSim` struct and its frame loop.

use rand_distr::{Binomial, Distribution};
use tracing::{debug, info, warn};

use wsn_core::{NodeId, SimConfig, SimRng, SINK};
use wsn_schedule::{schedule_snapshot, Frame, Slot};
use wsn_topology::Topology;

use crate::{SimError, SimObserver, SimResult};

/// A rebuilt frame longer than this many template frames is logged as
/// overload: arrivals outpace what one frame can drain.
pub(crate) const OVERLOAD_FACTOR: usize = 8;

/// Per-slot arrival process at each non-sink node.
pub(crate) enum Arrivals {
    Bernoulli(f64),
    Binomial(Binomial),
}

impl Arrivals {
    fn draw(&self, rng: &mut SimRng) -> u32 {
        match self {
            Arrivals::Bernoulli(p) => rng.gen_bool(*p) as u32,
            Arrivals::Binomial(dist) => dist.sample(rng.inner()) as u32,
        }
    }
}

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Summary of a finished (or partially stepped) run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimReport {
    /// Mean of the per-frame total buffer occupancy.
    pub mean_occupancy: f64,
    /// Mean per-frame occupancy of each node (the sink's entry is always 0).
    pub per_node_mean: Vec<f64>,
    pub frames: u64,
    pub slots: u64,
    /// Messages absorbed by the sink.
    pub delivered: u64,
    /// Messages generated by the arrival process.
    pub arrived: u64,
    /// Scheduled transmissions skipped because the sender had nothing to send.
    pub idle_transmissions: u64,
    pub adaptations: u64,
    /// Rebuilds whose frame exceeded `OVERLOAD_FACTOR` template frames.
    pub overloaded_rebuilds: u64,
    /// Slots in the longest frame run so far.
    pub longest_frame: u64,
}

// ── BufferSim ─────────────────────────────────────────────────────────────────

/// Replays a frame schedule against random traffic.
///
/// Two counters per node are kept apart: `outgoing` holds what the schedule
/// can move this frame, `incoming` collects arrivals until the frame
/// boundary.  The schedule itself is never re-validated against the live
/// counters; a transmission from an empty sender is simply skipped.
///
/// Create via [`BufferSimBuilder`][crate::BufferSimBuilder].
pub struct BufferSim {
    pub config: SimConfig,

    /// Owned topology.  Balanced routing keeps raising its weights on every
    /// rebuild.
    pub topology: Topology,

    pub rng: SimRng,

    pub(crate) arrivals: Arrivals,

    /// Schedule replayed each frame.
    pub frame: Frame,

    /// One-message-per-node schedule used whenever a rebuild snapshot is empty.
    pub(crate) template: Frame,

    /// Arrivals since the last frame boundary.
    pub incoming: Vec<u32>,

    /// Messages the schedule can move this frame.
    pub outgoing: Vec<u32>,

    /// Index of the next frame to run.
    pub current_frame: u64,

    pub(crate) occupancy_sum: u64,
    pub(crate) per_node_sum:  Vec<u64>,
    pub(crate) delivered:     u64,
    pub(crate) arrived:       u64,
    pub(crate) idle:          u64,
    pub(crate) slots_run:     u64,
    pub(crate) adaptations:   u64,
    pub(crate) overloaded:    u64,
    pub(crate) longest_frame: u64,
}

impl BufferSim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the remaining frames up to `config.num_frames`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        while self.current_frame < self.config.num_frames {
            self.process_frame(observer)?;
        }
        observer.on_sim_end(self.current_frame);

        let report = self.report();
        info!(
            frames = report.frames,
            mean_occupancy = report.mean_occupancy,
            delivered = report.delivered,
            adaptations = report.adaptations,
            "simulation complete"
        );
        Ok(report)
    }

    /// Run exactly `n` frames from the current position (ignores the horizon).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_frame(observer)?;
        }
        Ok(())
    }

    /// Statistics over the frames run so far.
    pub fn report(&self) -> SimReport {
        let frames = self.current_frame;
        let mean = |sum: u64| if frames == 0 { 0.0 } else { sum as f64 / frames as f64 };
        SimReport {
            mean_occupancy:     mean(self.occupancy_sum),
            per_node_mean:      self.per_node_sum.iter().map(|&s| mean(s)).collect(),
            frames,
            slots:              self.slots_run,
            delivered:          self.delivered,
            arrived:            self.arrived,
            idle_transmissions: self.idle,
            adaptations:        self.adaptations,
            overloaded_rebuilds: self.overloaded,
            longest_frame:      self.longest_frame,
        }
    }

    /// Messages buffered across all non-sink nodes right now.
    pub fn buffered(&self) -> u64 {
        self.incoming
            .iter()
            .zip(&self.outgoing)
            .skip(1)
            .map(|(&i, &o)| i as u64 + o as u64)
            .sum()
    }

    // ── Core frame processing ─────────────────────────────────────────────

    fn process_frame<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let index = self.current_frame;
        observer.on_frame_start(index, &self.frame);

        let delivered_before = self.delivered;
        let frame = std::mem::take(&mut self.frame);
        let replayed = frame
            .iter()
            .enumerate()
            .try_for_each(|(slot_index, slot)| {
                self.draw_arrivals()?;
                self.apply_slot(slot)?;
                observer.on_slot_end(index, slot_index, slot, &self.outgoing);
                Ok::<(), SimError>(())
            });
        self.slots_run += frame.len() as u64;
        self.longest_frame = self.longest_frame.max(frame.len() as u64);
        self.frame = frame;
        replayed?;

        // ── Frame boundary: sample, then merge ────────────────────────────
        let mut occupancy = 0u64;
        for node in 1..self.outgoing.len() {
            let held = self.incoming[node] as u64 + self.outgoing[node] as u64;
            self.per_node_sum[node] += held;
            occupancy += held;
            let merged = u32::try_from(held).map_err(|_| self.overflow(node))?;
            self.outgoing[node] = merged;
            self.incoming[node] = 0;
        }
        self.occupancy_sum += occupancy;
        observer.on_frame_end(index, occupancy, self.delivered - delivered_before, &self.outgoing);

        if self.config.adapts_after(index) && index + 1 < self.config.num_frames {
            self.adapt()?;
            observer.on_adaptation(index, &self.frame);
        }

        self.current_frame += 1;
        Ok(())
    }

    fn draw_arrivals(&mut self) -> SimResult<()> {
        for node in 1..self.incoming.len() {
            let n = self.arrivals.draw(&mut self.rng);
            let total = self.incoming[node].checked_add(n).ok_or_else(|| self.overflow(node))?;
            self.incoming[node] = total;
            self.arrived += n as u64;
        }
        Ok(())
    }

    fn apply_slot(&mut self, slot: &Slot) -> SimResult<()> {
        for tx in slot.iter() {
            let sender = tx.sender.index();
            if self.outgoing[sender] == 0 {
                self.idle += 1;
                continue;
            }
            self.outgoing[sender] -= 1;
            if tx.receiver == SINK {
                self.delivered += 1;
            } else {
                let receiver = tx.receiver.index();
                let total = self.outgoing[receiver].checked_add(1).ok_or_else(|| self.overflow(receiver))?;
                self.outgoing[receiver] = total;
            }
        }
        Ok(())
    }

    fn overflow(&self, node: usize) -> SimError {
        SimError::BufferOverflow { node: NodeId(node as u32), frame: self.current_frame }
    }

    /// Replace the schedule with one built from the current backlog.
    fn adapt(&mut self) -> SimResult<()> {
        let snapshot = self.outgoing.clone();
        let rebuilt = schedule_snapshot(&mut self.topology, self.config.routing, &snapshot)?.frame;
        let fallback = rebuilt.is_empty();
        if rebuilt.len() > self.template.len() * OVERLOAD_FACTOR {
            self.overloaded += 1;
            warn!(
                frame = self.current_frame,
                slots = rebuilt.len(),
                template_slots = self.template.len(),
                backlog = self.buffered(),
                "rebuilt frame far exceeds template; arrivals outpace the schedule"
            );
        }
        self.frame = if fallback { self.template.clone() } else { rebuilt };
        self.adaptations += 1;
        debug!(
            frame = self.current_frame,
            backlog = self.buffered(),
            slots = self.frame.len(),
            fallback,
            "schedule adapted"
        );
        Ok(())
    }
}
