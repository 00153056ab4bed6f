//! Simulation and routing configuration.
//!
//! `SimConfig` is plain data.  Applications typically build it in code or
//! load it from JSON (with the `serde` feature) and hand it to the buffer
//! simulator, which calls [`SimConfig::validate`] before doing any work.

use crate::{WsnError, WsnResult};

// ── RoutingMode ───────────────────────────────────────────────────────────────

/// How the route builder picks paths toward the sink.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoutingMode {
    /// One static shortest path per node, shared by all its messages.
    #[default]
    Unbalanced,
    /// Per-message paths with load-proportional edge penalties.
    Balanced,
}

impl RoutingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingMode::Unbalanced => "unbalanced",
            RoutingMode::Balanced   => "balanced",
        }
    }
}

impl std::fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Parameters for one buffer-occupancy simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Per-trial arrival probability at every non-sink node, in `[0, 1]`.
    pub arrival_probability: f64,

    /// Number of frame repetitions to simulate.  Must be at least 1.
    pub num_frames: u64,

    /// Rebuild the frame every `adaptation` frames.  `0` disables rebuilds.
    pub adaptation: u64,

    /// Arrival trials per node per slot.  `1` is a Bernoulli process; larger
    /// values draw from `Binomial(max_arrivals_per_slot, p)`.
    pub max_arrivals_per_slot: u32,

    /// Route selection used for the initial frame and every rebuild.
    pub routing: RoutingMode,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arrival_probability:   0.01,
            num_frames:            100,
            adaptation:            0,
            max_arrivals_per_slot: 1,
            routing:               RoutingMode::Unbalanced,
            seed:                  42,
        }
    }
}

impl SimConfig {
    /// Reject parameters the simulator cannot run with.
    pub fn validate(&self) -> WsnResult<()> {
        let p = self.arrival_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(WsnError::InvalidParameter {
                name:   "arrival_probability",
                reason: format!("{p} is outside [0, 1]"),
            });
        }
        if self.num_frames == 0 {
            return Err(WsnError::InvalidParameter {
                name:   "num_frames",
                reason: "horizon must be at least one frame".into(),
            });
        }
        if self.max_arrivals_per_slot == 0 {
            return Err(WsnError::InvalidParameter {
                name:   "max_arrivals_per_slot",
                reason: "at least one arrival trial per slot is required".into(),
            });
        }
        Ok(())
    }

    /// `true` if the frame is rebuilt after frame index `frame` (0-based).
    #[inline]
    pub fn adapts_after(&self, frame: u64) -> bool {
        self.adaptation > 0 && (frame + 1) % self.adaptation == 0
    }
}
