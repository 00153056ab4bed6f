//! `wsn-sim` — replays frames against stochastic arrivals.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.num_frames:
//!   for slot in frame:
//!     ① Arrivals — each non-sink node draws Bernoulli(p) (or Binomial(k, p))
//!                  new messages into its `incoming` counter.
//!     ② Apply    — each transmission moves one message from the sender's
//!                  `outgoing` counter to the receiver's (the sink absorbs).
//!   ③ Sample     — add Σ(incoming + outgoing) to the running occupancy.
//!   ④ Merge      — outgoing += incoming; incoming = 0.
//!   ⑤ Adapt      — every `adaptation` frames, rebuild the frame from the
//!                  current outgoing snapshot.
//! ```
//!
//! The schedule's shape is reused across frames regardless of how much
//! traffic actually arrives; adaptation is what makes it track load.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`run_replications`] fans out over Rayon.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wsn_core::SimConfig;
//! use wsn_sim::{BufferSimBuilder, NoopObserver};
//!
//! let mut sim = BufferSimBuilder::new(config, topology).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("mean occupancy {}", report.mean_occupancy);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod replicate;
pub mod sim;


pub use builder::BufferSimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use replicate::{run_replications, ReplicationSummary};
pub use sim::{BufferSim, SimReport};
