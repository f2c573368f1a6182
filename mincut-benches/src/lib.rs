//! Benchmark support crate for mincut.
//!
//! Provides parameter types and memory-profiling helpers used by Criterion
//! benchmarks covering orchestrator trial runs, CLICK graph generation, and
//! peak-memory validation against [`mincut_core::estimate_rc_peak_bytes`].

pub mod error;
pub mod params;
pub mod profiling;
