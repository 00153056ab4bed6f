//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wsn_schedule::Frame;
use wsn_sim::SimObserver;

use crate::row::{FrameSummaryRow, ScheduleRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes frame summaries and every schedule the
/// simulator adopts to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    current_slots: u64,
    wrote_initial: bool,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, current_slots: 0, wrote_initial: false, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_frame(&mut self, first_frame: u64, schedule: &Frame) {
        let rows: Vec<ScheduleRow> = schedule
            .iter()
            .enumerate()
            .flat_map(|(slot, s)| {
                s.iter().map(move |tx| ScheduleRow {
                    frame:    first_frame,
                    slot:     slot as u32,
                    sender:   tx.sender.0,
                    receiver: tx.receiver.0,
                })
            })
            .collect();
        let result = self.writer.write_schedule(&rows);
        self.store_err(result);
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_frame_start(&mut self, frame: u64, schedule: &Frame) {
        self.current_slots = schedule.len() as u64;
        if !self.wrote_initial {
            self.wrote_initial = true;
            self.write_frame(frame, schedule);
        }
    }

    fn on_frame_end(&mut self, frame: u64, occupancy: u64, delivered: u64, _buffers: &[u32]) {
        let row = FrameSummaryRow { frame, slots: self.current_slots, occupancy, delivered };
        let result = self.writer.write_frame_summary(&row);
        self.store_err(result);
    }

    fn on_adaptation(&mut self, frame: u64, schedule: &Frame) {
        self.write_frame(frame + 1, schedule);
    }

    fn on_sim_end(&mut self, _frames: u64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
