//! Builder utilities for configuring a minimum-cut trial run.
//!
//! Follows the workspace's fluent-builder idiom: defaults populate a usable
//! configuration, `with_*` setters return `Self` for chaining, and `build`
//! validates the accumulated state.

use crate::error::{MincutError, Result};

/// Default per-worker dense-matrix memory ceiling passed to
/// [`crate::memory::group_size_for_budget`] during HC group sizing (§4.G,
/// §5): "peaking at ~2.5 GB per worker is assumed acceptable".
const DEFAULT_MAX_WORKER_MEMORY_BYTES: u64 = 2_684_354_560;

/// Overrides the orchestrator's LC/HC mode selection (§4.E). Exists mainly to
/// make the variant boundary deterministically testable; production callers
/// should leave this at [`ConcurrencyOverride::Auto`].
///
/// # Examples
/// ```
/// use mincut_core::ConcurrencyOverride;
///
/// let mode = ConcurrencyOverride::Auto;
/// assert!(matches!(mode, ConcurrencyOverride::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyOverride {
    /// Select LC/HC using the processors-vs-trials heuristic (§4.E).
    Auto,
    /// Force low-concurrency mode regardless of processor count.
    ForceLowConcurrency,
    /// Force high-concurrency mode regardless of processor count.
    ForceHighConcurrency,
}

/// Configures and constructs a [`crate::TrialConfig`].
///
/// # Examples
/// ```
/// use mincut_core::TrialConfigBuilder;
///
/// let config = TrialConfigBuilder::new()
///     .with_success_probability(0.95)
///     .with_base_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(config.base_seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct TrialConfigBuilder {
    success_probability: f64,
    base_seed: u64,
    base_case_multiplier: f64,
    max_base_case_vertices: usize,
    max_base_case_edges: usize,
    concurrency_override: ConcurrencyOverride,
    max_worker_memory_bytes: u64,
}

impl Default for TrialConfigBuilder {
    fn default() -> Self {
        Self {
            success_probability: 0.9,
            base_seed: 0,
            base_case_multiplier: 2.0,
            max_base_case_vertices: 128,
            max_base_case_edges: 512,
            concurrency_override: ConcurrencyOverride::Auto,
            max_worker_memory_bytes: DEFAULT_MAX_WORKER_MEMORY_BYTES,
        }
    }
}

impl TrialConfigBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum acceptable probability that a trial run returns the
    /// true minimum cut.
    #[must_use]
    pub fn with_success_probability(mut self, p: f64) -> Self {
        self.success_probability = p;
        self
    }

    /// Sets the PRNG seed from which every worker's stream is mixed (§4.G).
    #[must_use]
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    /// Sets the tuning constant `c` used by the ISS target-size formula
    /// `T = ceil(c*sqrt(m)) + 1`.
    #[must_use]
    pub fn with_base_case_multiplier(mut self, c: f64) -> Self {
        self.base_case_multiplier = c;
        self
    }

    /// Sets the vertex-count ceiling below which the sequential base case
    /// prefers the deterministic Stoer-Wagner fallback.
    #[must_use]
    pub fn with_max_base_case_vertices(mut self, max_vertices: usize) -> Self {
        self.max_base_case_vertices = max_vertices;
        self
    }

    /// Sets the edge-count ceiling below which the sequential base case
    /// prefers the deterministic Stoer-Wagner fallback.
    #[must_use]
    pub fn with_max_base_case_edges(mut self, max_edges: usize) -> Self {
        self.max_base_case_edges = max_edges;
        self
    }

    /// Forces a specific LC/HC variant, bypassing the processors-vs-trials
    /// heuristic. Intended for tests.
    #[must_use]
    pub fn with_concurrency_override(mut self, mode: ConcurrencyOverride) -> Self {
        self.concurrency_override = mode;
        self
    }

    /// Sets the per-worker dense-matrix memory ceiling consulted by the HC
    /// group-sizing step (§4.G, §5).
    #[must_use]
    pub fn with_max_worker_memory_bytes(mut self, max_bytes: u64) -> Self {
        self.max_worker_memory_bytes = max_bytes;
        self
    }

    /// Validates the configuration and constructs a [`crate::TrialConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`MincutError::InvalidSuccessProbability`] if
    /// `success_probability` is not in `(0, 1)`, or
    /// [`MincutError::InvalidBaseCaseMultiplier`] if `c <= 0`.
    pub fn build(self) -> Result<crate::TrialConfig> {
        if !(self.success_probability > 0.0 && self.success_probability < 1.0) {
            return Err(MincutError::InvalidSuccessProbability {
                got: self.success_probability.to_string(),
            });
        }
        if !(self.base_case_multiplier > 0.0) {
            return Err(MincutError::InvalidBaseCaseMultiplier {
                got: self.base_case_multiplier.to_string(),
            });
        }

        Ok(crate::TrialConfig {
            success_probability: self.success_probability,
            base_seed: self.base_seed,
            base_case_multiplier: self.base_case_multiplier,
            max_base_case_vertices: self.max_base_case_vertices,
            max_base_case_edges: self.max_base_case_edges,
            concurrency_override: self.concurrency_override,
            max_worker_memory_bytes: self.max_worker_memory_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builder_is_valid() {
        assert!(TrialConfigBuilder::new().build().is_ok());
    }

    #[test]
    fn rejects_out_of_range_success_probability() {
        let err = TrialConfigBuilder::new()
            .with_success_probability(1.0)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), crate::MincutErrorCode::InvalidSuccessProbability);
    }

    #[test]
    fn rejects_non_positive_multiplier() {
        let err = TrialConfigBuilder::new()
            .with_base_case_multiplier(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err.code(), crate::MincutErrorCode::InvalidBaseCaseMultiplier);
    }
}
