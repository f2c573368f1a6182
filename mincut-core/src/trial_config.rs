//! Validated trial configuration produced by [`crate::TrialConfigBuilder`].

use crate::builder::ConcurrencyOverride;

/// Validated parameters governing one [`crate::Orchestrator::run`] call.
///
/// Constructed exclusively through [`crate::TrialConfigBuilder::build`], so
/// every live instance satisfies its invariants (`0 < success_probability <
/// 1`, `base_case_multiplier > 0`).
#[derive(Debug, Clone)]
pub struct TrialConfig {
    pub(crate) success_probability: f64,
    pub(crate) base_seed: u64,
    pub(crate) base_case_multiplier: f64,
    pub(crate) max_base_case_vertices: usize,
    pub(crate) max_base_case_edges: usize,
    pub(crate) concurrency_override: ConcurrencyOverride,
    pub(crate) max_worker_memory_bytes: u64,
}

impl TrialConfig {
    /// The minimum acceptable probability that a run returns the true
    /// minimum cut.
    #[must_use]
    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    /// The PRNG seed from which every worker's stream is mixed.
    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// The tuning constant `c` used by the ISS target-size formula.
    #[must_use]
    pub fn base_case_multiplier(&self) -> f64 {
        self.base_case_multiplier
    }

    /// The vertex-count ceiling for the sequential base case.
    #[must_use]
    pub fn max_base_case_vertices(&self) -> usize {
        self.max_base_case_vertices
    }

    /// The edge-count ceiling for the sequential base case.
    #[must_use]
    pub fn max_base_case_edges(&self) -> usize {
        self.max_base_case_edges
    }

    /// The configured LC/HC override.
    #[must_use]
    pub fn concurrency_override(&self) -> ConcurrencyOverride {
        self.concurrency_override
    }

    /// The per-worker dense-matrix memory ceiling consulted by the HC
    /// group-sizing step (§4.G, §5).
    #[must_use]
    pub fn max_worker_memory_bytes(&self) -> u64 {
        self.max_worker_memory_bytes
    }
}
