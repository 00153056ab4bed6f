//! `wsn-routing` — decides which path every pending message takes to the sink.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`plan`]    | `ActiveRoute`, `RoutePlan` (per-holder FIFO queues)       |
//! | [`builder`] | `RouteBuilder`: unbalanced and balanced modes             |
//! | [`error`]   | `RoutingError`, `RoutingResult<T>`                        |
//!
//! # Modes
//!
//! ```text
//! Unbalanced:  one shortest-path tree from the sink; every message at a
//!              node gets its own clone of that node's template route.
//! Balanced:    nodes in ascending distance from the sink; for each message
//!              compute a fresh shortest path, then raise the weight of each
//!              link on it by load[far] / N², steering later messages away.
//! ```
//!
//! Balancing mutates the caller's `Topology` weights in place and never
//! lowers any of them.

pub mod builder;
pub mod error;
pub mod plan;


pub use builder::{one_per_node, RouteBuilder};
pub use error::{RoutingError, RoutingResult};
pub use plan::{ActiveRoute, RoutePlan};
