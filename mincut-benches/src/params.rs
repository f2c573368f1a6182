//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so that benchmark
//! helper functions stay under the Clippy `too-many-arguments` threshold.

use std::fmt;

/// Parameters for an [`mincut_core::Orchestrator::run`] benchmark.
#[derive(Clone, Debug)]
pub struct OrchestratorBenchParams {
    /// Number of vertices in the graph under test.
    pub vertex_count: u64,
    /// Worker count passed to `Orchestrator::run`.
    pub processors: usize,
}

impl fmt::Display for OrchestratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},p={}", self.vertex_count, self.processors)
    }
}

/// Parameters for a [`mincut_providers_click::ClickGraphSource`] generation
/// benchmark.
#[derive(Clone, Debug)]
pub struct ClickBenchParams {
    /// Number of vertices to generate.
    pub vertex_count: u64,
    /// Number of clusters the vertices are partitioned into.
    pub clusters: u64,
}

impl fmt::Display for ClickBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},s={}", self.vertex_count, self.clusters)
    }
}
