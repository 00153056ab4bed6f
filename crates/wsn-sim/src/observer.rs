//! Simulation observer trait for progress reporting and data collection.

use wsn_schedule::{Frame, Slot};

/// Callbacks invoked by [`BufferSim::run`][crate::BufferSim::run] at frame
/// and slot boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: occupancy printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_frame_end(&mut self, frame: u64, occupancy: u64, _delivered: u64, _buffers: &[u32]) {
///         println!("frame {frame}: {occupancy} buffered");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the first slot of each frame, with the schedule in use.
    fn on_frame_start(&mut self, _frame: u64, _schedule: &Frame) {}

    /// Called after a slot's arrivals and transmissions have been applied.
    ///
    /// `outgoing` is the per-node counter the schedule drains.
    fn on_slot_end(&mut self, _frame: u64, _slot_index: usize, _slot: &Slot, _outgoing: &[u32]) {}

    /// Called at each frame boundary after incoming traffic is merged.
    ///
    /// `occupancy` is the total sampled for this frame; `delivered` counts
    /// messages the sink absorbed during it.
    fn on_frame_end(&mut self, _frame: u64, _occupancy: u64, _delivered: u64, _buffers: &[u32]) {}

    /// Called after the schedule is rebuilt following frame `frame`.
    fn on_adaptation(&mut self, _frame: u64, _schedule: &Frame) {}

    /// Called once after the final frame completes.
    fn on_sim_end(&mut self, _frames: u64) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
