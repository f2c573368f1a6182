//! Error types for the mincut core library.
//!
//! Defines error enums exposed by the public API and a convenient result
//! alias, following the stable `ErrorCode` pattern used throughout this
//! workspace: each error carries a `#[non_exhaustive]` `thiserror` variant
//! plus a matching machine-readable code accessible without matching on
//! `Display` text.

use std::{fmt, sync::Arc};

use thiserror::Error;

/// Stable codes describing [`GraphSourceError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GraphSourceErrorCode {
    /// An edge referenced a vertex id outside `[0, vertex_count)`.
    VertexOutOfRange,
    /// The source's declared header did not match the content that followed.
    Malformed,
    /// The requested slice range was invalid for the source's edge count.
    InvalidSlice,
}

impl GraphSourceErrorCode {
    /// Returns the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VertexOutOfRange => "GRAPH_SOURCE_VERTEX_OUT_OF_RANGE",
            Self::Malformed => "GRAPH_SOURCE_MALFORMED",
            Self::InvalidSlice => "GRAPH_SOURCE_INVALID_SLICE",
        }
    }
}

impl fmt::Display for GraphSourceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error produced while reading or slicing a [`crate::GraphSource`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphSourceError {
    /// An edge referenced a vertex id outside `[0, vertex_count)`.
    #[error("edge endpoint {vertex} is out of range for vertex_count {vertex_count}")]
    VertexOutOfRange { vertex: u64, vertex_count: u64 },
    /// The source's declared header did not match the content that followed.
    #[error("malformed graph source `{name}`: {reason}")]
    Malformed { name: Arc<str>, reason: Arc<str> },
    /// The requested slice range was invalid for the source's edge count.
    #[error("invalid slice rank={rank} group_size={group_size} for edge_count={edge_count}")]
    InvalidSlice {
        rank: usize,
        group_size: usize,
        edge_count: u64,
    },
}

impl GraphSourceError {
    /// Retrieves the stable [`GraphSourceErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GraphSourceErrorCode {
        match self {
            Self::VertexOutOfRange { .. } => GraphSourceErrorCode::VertexOutOfRange,
            Self::Malformed { .. } => GraphSourceErrorCode::Malformed,
            Self::InvalidSlice { .. } => GraphSourceErrorCode::InvalidSlice,
        }
    }
}

/// Stable codes describing [`MincutError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MincutErrorCode {
    /// The target success probability was outside `(0, 1)`.
    InvalidSuccessProbability,
    /// The base-case multiplier `c` was not a positive number.
    InvalidBaseCaseMultiplier,
    /// The trial-count formula would overflow for the given inputs.
    TrialCountOverflow,
    /// A precondition of an internal operation was violated.
    PreconditionViolation,
    /// A group-size invariant required by the RC recursion did not hold.
    GroupSizeInvariant,
    /// The supplied graph source failed.
    GraphSourceFailure,
}

impl MincutErrorCode {
    /// Returns the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSuccessProbability => "MINCUT_INVALID_SUCCESS_PROBABILITY",
            Self::InvalidBaseCaseMultiplier => "MINCUT_INVALID_BASE_CASE_MULTIPLIER",
            Self::TrialCountOverflow => "MINCUT_TRIAL_COUNT_OVERFLOW",
            Self::PreconditionViolation => "MINCUT_PRECONDITION_VIOLATION",
            Self::GroupSizeInvariant => "MINCUT_GROUP_SIZE_INVARIANT",
            Self::GraphSourceFailure => "MINCUT_GRAPH_SOURCE_FAILURE",
        }
    }
}

impl fmt::Display for MincutErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced while configuring or running the solver.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MincutError {
    /// The target success probability was outside `(0, 1)`.
    #[error("success_probability must lie in (0, 1) (got {got})")]
    InvalidSuccessProbability { got: String },
    /// The base-case multiplier `c` was not a positive number.
    #[error("base_case_multiplier must be positive (got {got})")]
    InvalidBaseCaseMultiplier { got: String },
    /// The trial-count formula would overflow for the given inputs.
    #[error(
        "trial count for n={vertex_count} m={edge_count} p_succ={success_probability} overflows u64; reduce success_probability or shrink the input"
    )]
    TrialCountOverflow {
        vertex_count: u64,
        edge_count: u64,
        success_probability: String,
    },
    /// A precondition of an internal operation was violated.
    #[error("precondition violated: {detail}")]
    PreconditionViolation { detail: Arc<str> },
    /// A group-size invariant required by the RC recursion did not hold.
    #[error("group size invariant violated: {detail} (group_size={group_size})")]
    GroupSizeInvariant { detail: Arc<str>, group_size: usize },
    /// The supplied graph source failed.
    #[error("graph source `{name}` failed: {error}")]
    GraphSource {
        name: Arc<str>,
        #[source]
        error: GraphSourceError,
    },
}

impl MincutError {
    /// Retrieves the stable [`MincutErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> MincutErrorCode {
        match self {
            Self::InvalidSuccessProbability { .. } => MincutErrorCode::InvalidSuccessProbability,
            Self::InvalidBaseCaseMultiplier { .. } => {
                MincutErrorCode::InvalidBaseCaseMultiplier
            }
            Self::TrialCountOverflow { .. } => MincutErrorCode::TrialCountOverflow,
            Self::PreconditionViolation { .. } => MincutErrorCode::PreconditionViolation,
            Self::GroupSizeInvariant { .. } => MincutErrorCode::GroupSizeInvariant,
            Self::GraphSource { .. } => MincutErrorCode::GraphSourceFailure,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, MincutError>;
