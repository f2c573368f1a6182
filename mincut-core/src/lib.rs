//! Mincut core library: a distributed Monte-Carlo minimum edge-cut solver.
//!
//! The public surface follows dependency order from the data model up: edge
//! storage ([`edge`]), sampling kernels ([`sampling`]), the distributed
//! shrinking primitive ([`iss`]), the dense-matrix reduce and recursive
//! contraction ([`dense_matrix`], [`rc`]), the sequential base case
//! ([`base_case`]), and the trial orchestrator that ties them together
//! ([`orchestrator`]).

mod base_case;
mod builder;
mod cluster;
mod dense_matrix;
mod edge;
mod error;
mod graph_source;
mod iss;
mod memory;
mod orchestrator;
mod rc;
mod report;
mod sampling;
mod trial_config;
mod union_find;

pub use crate::{
    builder::{ConcurrencyOverride, TrialConfigBuilder},
    cluster::{Cluster, CollectiveTimer},
    dense_matrix::DenseMatrix,
    edge::{EdgeSlice, WeightedEdge},
    error::{GraphSourceError, GraphSourceErrorCode, MincutError, MincutErrorCode, Result},
    graph_source::{GraphSource, edge_slice_bounds},
    iss::Iss,
    memory::{estimate_rc_peak_bytes, format_bytes, group_size_for_budget},
    orchestrator::Orchestrator,
    report::{CutReport, Variant},
    sampling::{DELTA, EPSILON, SumTree},
    trial_config::TrialConfig,
    union_find::DisjointSet,
};
