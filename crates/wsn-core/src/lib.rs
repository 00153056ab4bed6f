//! `wsn-core` — foundational types for convergecast slot scheduling.
//!
//! This crate is a dependency of every other `wsn-*` crate.  It has no
//! `wsn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `NodeId`, the `SINK` constant                          |
//! | [`config`] | `SimConfig`, `RoutingMode`                             |
//! | [`rng`]    | `SimRng` (seeded, reproducible)                        |
//! | [`error`]  | `WsnError`, `WsnResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RoutingMode, SimConfig};
pub use error::{WsnError, WsnResult};
pub use ids::{NodeId, SINK};
pub use rng::SimRng;
