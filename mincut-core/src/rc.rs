//! Parallel Recursive Contract (§4.D).
//!
//! `recursive_contract` walks one group's dense matrix down through
//! successive contraction levels, halving the group at each level via
//! [`Cluster::halve`] and duplicating the contracted matrix onto both
//! halves — the classic Karger-Stein success-amplification trick: each half
//! independently continues contracting with its own randomness, so the
//! group's `p'` original worker slots end up, after `log2(p')` levels, as
//! `p'` independent singleton base-case runs. Every one of those `p'`
//! candidate values is returned; the orchestrator (§4.E) folds them — along
//! with every other group's candidates — into one global minimum. RC itself
//! never combines candidates with `min`; that is the orchestrator's job.

use std::sync::Arc;

use rand::Rng;
use tracing::instrument;

use crate::base_case;
use crate::cluster::Cluster;
use crate::dense_matrix::DenseMatrix;
use crate::error::{MincutError, Result};
use crate::trial_config::TrialConfig;
use crate::union_find::DisjointSet;

/// Maximum number of retries for a contraction level that fails to reach
/// its target vertex count (§4.D step 4, "a sampling edge case").
const MAX_LEVEL_RETRIES: u32 = 16;

/// Target vertex count for one contraction level: `ceil(n / sqrt(2)) + 1`.
#[must_use]
pub fn level_target(current_n: usize) -> usize {
    if current_n <= 1 {
        return current_n;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "vertex counts stay well within f64's exact integer range"
    )]
    #[allow(
        clippy::float_arithmetic,
        reason = "target-size formula is inherently floating-point (§4.D)"
    )]
    let target = ((current_n as f64) / std::f64::consts::SQRT_2).ceil() as usize + 1;
    target.min(current_n)
}

/// Runs one contraction level: samples `ceil(n^1.2)` weighted `(row, col)`
/// pairs, runs a prefix connected-components scan stopping at `target`
/// components, and contracts the matrix accordingly. Retries (bounded by
/// [`MAX_LEVEL_RETRIES`]) if the resulting vertex count does not equal
/// `target` exactly.
fn one_level(matrix: &DenseMatrix, target: usize, new_group_size: usize, rng: &mut impl Rng) -> DenseMatrix {
    let n = matrix.logical_vertex_count().max(1);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sample counts stay well within f64's exact integer range"
    )]
    #[allow(
        clippy::float_arithmetic,
        reason = "sample-count formula is inherently floating-point (§4.D)"
    )]
    let sample_count = ((n as f64).powf(1.2)).ceil() as usize;

    for _ in 0..MAX_LEVEL_RETRIES {
        let samples = matrix.sample_edges(sample_count.max(1), rng);

        let mut dsu = DisjointSet::new(matrix.logical_vertex_count());
        for (i, j) in &samples {
            if dsu.components() <= target {
                break;
            }
            dsu.union(*i, *j);
        }
        let vertex_map = dsu.labeling();
        let new_n = dsu.components();

        let contracted = matrix.contract(&vertex_map, new_n, new_group_size);
        if new_n == target || samples.is_empty() {
            return contracted;
        }
    }

    // Exhausted retries: accept whatever the last attempt produced rather
    // than looping forever on a pathological (near-empty) matrix.
    let samples = matrix.sample_edges(sample_count.max(1), rng);
    let mut dsu = DisjointSet::new(matrix.logical_vertex_count());
    for (i, j) in &samples {
        if dsu.components() <= target {
            break;
        }
        dsu.union(*i, *j);
    }
    let vertex_map = dsu.labeling();
    let new_n = dsu.components();
    matrix.contract(&vertex_map, new_n, new_group_size)
}

/// Runs the full RC recursion over `matrix` within `cluster`, returning one
/// candidate upper-bound weight per worker slot (§4.D, §4.E).
///
/// # Errors
///
/// Returns [`MincutError::GroupSizeInvariant`] if `cluster.worker_count()` is
/// not a power of two — a precondition of the group-halving recursion (§4.D),
/// normally prevented upstream by the orchestrator's group sizing (§4.G); a
/// violation here indicates a bug in that sizing step, surfaced the way the
/// simulated `reassign_graph` collective would (§7).
#[instrument(skip(matrix, cluster, config), fields(group_size = cluster.worker_count(), n = matrix.logical_vertex_count()))]
pub fn recursive_contract(matrix: &DenseMatrix, cluster: &Cluster, config: &TrialConfig) -> Result<Vec<u64>> {
    if !cluster.worker_count().is_power_of_two() {
        return Err(MincutError::GroupSizeInvariant {
            detail: Arc::from("RC group size must be a power of two"),
            group_size: cluster.worker_count(),
        });
    }

    if cluster.worker_count() == 1 {
        let mut rng = cluster.rng_for(0);
        return Ok(vec![base_case::solve(matrix, config, &mut rng)]);
    }

    let current_n = matrix.logical_vertex_count();
    let target = level_target(current_n);
    let mut rng = cluster.rng_for(0);
    let new_group_size = cluster.worker_count() / 2;
    let contracted = one_level(matrix, target, new_group_size, &mut rng);

    let (bottom, top) = cluster.halve();
    let mut results = recursive_contract(&contracted, &bottom, config)?;
    results.extend(recursive_contract(&contracted, &top, config)?);
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{EdgeSlice, WeightedEdge};
    use crate::builder::TrialConfigBuilder;

    fn k4() -> DenseMatrix {
        let edges = [
            (0, 1, 1),
            (0, 2, 1),
            (0, 3, 1),
            (1, 2, 1),
            (1, 3, 1),
            (2, 3, 1),
        ];
        let slice = EdgeSlice::from_owned(
            edges
                .iter()
                .map(|&(u, v, w)| WeightedEdge::new(u, v, w))
                .collect(),
        );
        DenseMatrix::from_slices(&[slice], 4, 1)
    }

    #[test]
    fn level_target_shrinks_by_sqrt2() {
        assert_eq!(level_target(0), 0);
        assert_eq!(level_target(1), 1);
        assert!(level_target(100) < 100);
        assert!(level_target(100) >= 71);
    }

    #[test]
    fn recursive_contract_on_singleton_group_runs_base_case() {
        let matrix = k4();
        let cluster = Cluster::new(1, 7);
        let config = TrialConfigBuilder::new().build().unwrap();
        let candidates = recursive_contract(&matrix, &cluster, &config).unwrap();
        assert_eq!(candidates.len(), 1);
        // K4's true min cut is 3; RC is an upper bound.
        assert!(candidates[0] >= 3);
    }

    #[test]
    fn recursive_contract_produces_one_candidate_per_worker() {
        let matrix = k4();
        let cluster = Cluster::new(2, 7);
        let config = TrialConfigBuilder::new().build().unwrap();
        let candidates = recursive_contract(&matrix, &cluster, &config).unwrap();
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn recursive_contract_rejects_a_non_power_of_two_group() {
        let matrix = k4();
        let cluster = Cluster::new(3, 7);
        let config = TrialConfigBuilder::new().build().unwrap();
        let err = recursive_contract(&matrix, &cluster, &config).unwrap_err();
        assert_eq!(err.code(), crate::MincutErrorCode::GroupSizeInvariant);
    }
}
