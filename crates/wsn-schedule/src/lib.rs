//! `wsn-schedule` — builds collision-free frames that drain a buffer snapshot.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`frame`]     | `Transmission`, `Slot`, `Frame`                         |
//! | [`scheduler`] | `Scheduler`, `FrameReport`, `schedule_snapshot`         |
//! | [`error`]     | `SchedulingError`, `SchedulingResult<T>`                |
//!
//! # Slot rule
//!
//! ```text
//! for node in non-sink nodes, ascending distance to sink (ties by id):
//!   skip if buffer empty, or no next hop
//!   skip if transmit_locked[node] or receive_locked[next]
//!   send:   receive_locked ← node ∪ neighbors(node)
//!           transmit_locked ← next ∪ neighbors(next)
//! ```
//!
//! One pass over the nodes is one slot.  A frame is finished when every
//! non-sink buffer is empty, or when an optional slot horizon is reached.

pub mod error;
pub mod frame;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{SchedulingError, SchedulingResult};
pub use frame::{Frame, Slot, Transmission};
pub use scheduler::{schedule_snapshot, FrameReport, Scheduler};
