//! Graph source abstraction consumed by the trial orchestrator (§6).
//!
//! Mirrors the workspace's `DataSource` trait: a minimal surface (`len`-like
//! accessors, a fallible per-index accessor) that provider crates implement
//! independently of the solver. Here the "items" are edges rather than
//! vectors, and the fallible accessor is slice extraction rather than
//! distance computation.

use crate::edge::WeightedEdge;
use crate::error::GraphSourceError;

/// Abstraction over an input graph: something that can report its size and
/// hand back the contiguous edge slice owned by one worker.
///
/// # Examples
/// ```
/// use mincut_core::{GraphSource, GraphSourceError, WeightedEdge};
///
/// struct InMemory {
///     vertex_count: u64,
///     edges: Vec<WeightedEdge>,
/// }
///
/// impl GraphSource for InMemory {
///     fn name(&self) -> &str { "in-memory" }
///     fn vertex_count(&self) -> u64 { self.vertex_count }
///     fn edge_count(&self) -> u64 { self.edges.len() as u64 }
///     fn slice(&self, rank: usize, group_size: usize) -> Result<Vec<WeightedEdge>, GraphSourceError> {
///         let (start, end) = mincut_core::edge_slice_bounds(self.edge_count(), rank, group_size)?;
///         Ok(self.edges[start as usize..end as usize].to_vec())
///     }
/// }
///
/// let source = InMemory {
///     vertex_count: 3,
///     edges: vec![WeightedEdge::new(0, 1, 1), WeightedEdge::new(1, 2, 1)],
/// };
/// assert_eq!(source.vertex_count(), 3);
/// assert_eq!(source.slice(0, 1)?.len(), 2);
/// # Ok::<(), GraphSourceError>(())
/// ```
pub trait GraphSource {
    /// A human-readable name, used in result emission (§6).
    fn name(&self) -> &str;

    /// Number of vertices in `[0, vertex_count)`.
    fn vertex_count(&self) -> u64;

    /// Total number of edges across the whole graph.
    fn edge_count(&self) -> u64;

    /// Returns the contiguous edge slice
    /// `[ceil(edge_count*rank/group_size), ceil(edge_count*(rank+1)/group_size))`
    /// owned by worker `rank` out of `group_size` (§6).
    ///
    /// # Errors
    ///
    /// Returns [`GraphSourceError`] if the source is malformed or the slice
    /// bounds are invalid for `rank`/`group_size`.
    fn slice(&self, rank: usize, group_size: usize) -> Result<Vec<WeightedEdge>, GraphSourceError>;
}

/// Computes the half-open edge-index range `[start, end)` owned by worker
/// `rank` out of `group_size`, per §6's slice-extraction formula.
///
/// # Errors
///
/// Returns [`GraphSourceError::InvalidSlice`] if `group_size` is zero or
/// `rank >= group_size`.
pub fn edge_slice_bounds(
    edge_count: u64,
    rank: usize,
    group_size: usize,
) -> Result<(u64, u64), GraphSourceError> {
    if group_size == 0 || rank >= group_size {
        return Err(GraphSourceError::InvalidSlice {
            rank,
            group_size,
            edge_count,
        });
    }

    let start = edge_count
        .saturating_mul(rank as u64)
        .div_ceil(group_size as u64);
    let end = edge_count
        .saturating_mul((rank as u64) + 1)
        .div_ceil(group_size as u64);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::even_split(10, 0, 2, 0, 5)]
    #[case::even_split_second(10, 1, 2, 5, 10)]
    #[case::uneven_split_first(7, 0, 3, 0, 3)]
    #[case::uneven_split_last(7, 2, 3, 5, 7)]
    fn slice_bounds_match_formula(
        #[case] edge_count: u64,
        #[case] rank: usize,
        #[case] group_size: usize,
        #[case] expected_start: u64,
        #[case] expected_end: u64,
    ) {
        let (start, end) = edge_slice_bounds(edge_count, rank, group_size).unwrap();
        assert_eq!((start, end), (expected_start, expected_end));
    }

    #[test]
    fn slices_partition_the_full_range_without_gaps() {
        let edge_count = 17;
        let group_size = 5;
        let mut covered = 0;
        for rank in 0..group_size {
            let (start, end) = edge_slice_bounds(edge_count, rank, group_size).unwrap();
            assert_eq!(start, covered);
            covered = end;
        }
        assert_eq!(covered, edge_count);
    }

    #[test]
    fn rejects_rank_out_of_bounds() {
        let err = edge_slice_bounds(10, 3, 2).unwrap_err();
        assert_eq!(err.code(), crate::GraphSourceErrorCode::InvalidSlice);
    }

    #[test]
    fn rejects_zero_group_size() {
        assert!(edge_slice_bounds(10, 0, 0).is_err());
    }
}
