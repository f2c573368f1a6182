//! Benchmark setup error type.
//!
//! Aggregates the various error types that may arise during benchmark
//! data preparation so that setup functions can propagate failures
//! with `?` instead of using `.expect()`.

use crate::profiling::ProfilingError;
use mincut_core::{GraphSourceError, MincutError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph generation or loading failed.
    #[error("graph source failed: {0}")]
    GraphSource(#[from] GraphSourceError),
    /// Orchestrator trial execution failed.
    #[error("orchestrator run failed: {0}")]
    Orchestrator(#[from] MincutError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// Memory profiling failed.
    #[error("memory profiling failed: {0}")]
    Profiling(#[from] ProfilingError),
}
