//! Plain data row types written by output backends.

/// Per-frame totals sampled at the frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummaryRow {
    pub frame:     u64,
    /// Slots in the schedule replayed during this frame.
    pub slots:     u64,
    /// Messages held by non-sink nodes after incoming traffic is merged.
    pub occupancy: u64,
    /// Messages absorbed by the sink during this frame.
    pub delivered: u64,
}

/// One scheduled transmission.
///
/// Rows are emitted for the initial schedule and after each adaptation, so
/// `frame` is the first frame the schedule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRow {
    pub frame:    u64,
    pub slot:     u32,
    pub sender:   u32,
    pub receiver: u32,
}
