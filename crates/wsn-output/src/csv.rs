//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `frame_summaries.csv`
//! - `schedule.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{FrameSummaryRow, OutputResult, ScheduleRow};
use crate::writer::OutputWriter;

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    schedule:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("frame_summaries.csv"))?;
        summaries.write_record(["frame", "slots", "occupancy", "delivered"])?;

        let mut schedule = Writer::from_path(dir.join("schedule.csv"))?;
        schedule.write_record(["frame", "slot", "sender", "receiver"])?;

        Ok(Self { summaries, schedule, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.frame.to_string(),
            row.slots.to_string(),
            row.occupancy.to_string(),
            row.delivered.to_string(),
        ])?;
        Ok(())
    }

    fn write_schedule(&mut self, rows: &[ScheduleRow]) -> OutputResult<()> {
        for row in rows {
            self.schedule.write_record(&[
                row.frame.to_string(),
                row.slot.to_string(),
                row.sender.to_string(),
                row.receiver.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.schedule.flush()?;
        Ok(())
    }
}
