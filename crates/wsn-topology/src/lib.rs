//! `wsn-topology` — the sensor network graph and shortest-path queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `Topology` (CSR + mutable weights), `TopologyBuilder`       |
//! | [`router`]  | `Route`, Dijkstra queries on `Topology`                     |
//! | [`error`]   | `TopologyError`, `TopologyResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Route`.                |

pub mod error;
pub mod network;
pub mod router;


pub use error::{TopologyError, TopologyResult};
pub use network::{Topology, TopologyBuilder, DEFAULT_WEIGHT};
pub use router::Route;
