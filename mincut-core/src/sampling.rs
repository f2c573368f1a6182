//! Weighted and unweighted sampling kernels (§4.B).
//!
//! [`SumTree`] is a flat-array segment tree over partial sums, supporting
//! O(log n) weighted point selection from O(n) construction. It is grounded
//! on the original `sum_tree.hpp`'s "fold leaves pairwise up to a single
//! root" construction, adapted to own `Vec<u64>` storage instead of a raw
//! pre-allocated auxiliary buffer.

use rand::Rng;

use crate::edge::EdgeSlice;

/// Constant `epsilon` shared by the weighted and unweighted sample-count
/// formulas (§9: the distilled "0.09 vs 0.1" discrepancy was resolved in
/// favour of the single constant the original implementation actually uses).
pub const EPSILON: f64 = 0.1;

/// Constant `delta` used by the unweighted sparsity threshold.
pub const DELTA: f64 = 0.2;

/// A sum-balanced binary tree over non-negative weights, supporting weighted
/// random selection without replacement-sensitive bookkeeping (draws are
/// always with replacement).
pub struct SumTree {
    /// Internal array: `tree[0]` is the root (the grand total). Leaves occupy
    /// the tail of the array.
    tree: Vec<u64>,
    leaf_count: usize,
}

impl SumTree {
    /// Builds a sum tree over `weights` in O(n).
    #[must_use]
    pub fn build(weights: &[u64]) -> Self {
        let leaf_count = weights.len();
        if leaf_count == 0 {
            return Self {
                tree: vec![0],
                leaf_count: 0,
            };
        }

        // Round up to the next power of two so the tree is a perfect binary
        // tree; padding leaves carry weight zero and are never selected
        // except in the degenerate all-zero case (see `select`).
        let capacity = leaf_count.next_power_of_two();
        let mut tree = vec![0_u64; 2 * capacity];
        tree[capacity..capacity + leaf_count].copy_from_slice(weights);

        let mut level_start = capacity;
        let mut level_len = capacity;
        while level_len > 1 {
            let parent_start = level_start / 2;
            for i in 0..level_len / 2 {
                tree[parent_start + i] =
                    tree[level_start + 2 * i].saturating_add(tree[level_start + 2 * i + 1]);
            }
            level_start = parent_start;
            level_len /= 2;
        }

        Self { tree, leaf_count }
    }

    /// Total weight across all leaves.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.tree.first().copied().unwrap_or(0)
    }

    /// Number of leaves (excluding padding).
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaf_count
    }

    /// `true` if the tree has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    /// Draws one leaf index weighted by its value. Falls back to uniform
    /// selection over `[0, len)` when the total weight is zero (an all-zero
    /// weighted slice has no valid prefix target).
    ///
    /// # Panics
    ///
    /// Panics if the tree has no leaves.
    pub fn select(&self, rng: &mut impl Rng) -> usize {
        assert!(self.leaf_count > 0, "cannot select from an empty SumTree");

        let total = self.total();
        if total == 0 {
            return rng.gen_range(0..self.leaf_count);
        }

        let capacity = self.tree.len() / 2;
        let target = rng.gen_range(1..=total);
        let mut index = 1_usize;
        let mut remaining = target;
        while index < capacity {
            let left = index * 2;
            let left_weight = self.tree[left];
            if remaining <= left_weight {
                index = left;
            } else {
                remaining -= left_weight;
                index = left + 1;
            }
        }
        index - capacity
    }
}

/// Draws `k` edges from `slice` with replacement, weighted by edge weight.
/// If `slice` has at most one edge, returns `k` copies of it (or nothing if
/// the slice is empty) without building a tree.
#[must_use]
pub fn weighted_sample(slice: &EdgeSlice<'_>, k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let edges = slice.edges();
    if edges.len() <= 1 {
        return if edges.is_empty() { Vec::new() } else { vec![0; k] };
    }

    let weights: Vec<u64> = edges.iter().map(|e| e.weight()).collect();
    let tree = SumTree::build(&weights);
    (0..k).map(|_| tree.select(rng)).collect()
}

/// Draws `k` edges from `slice` with replacement, uniformly.
#[must_use]
pub fn unweighted_sample(slice: &EdgeSlice<'_>, k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let len = slice.len();
    if len == 0 {
        return Vec::new();
    }
    (0..k).map(|_| rng.gen_range(0..len)).collect()
}

/// Target sample count `S = ceil(n^(1 + epsilon/2))` shared by both the
/// weighted and unweighted distribution formulas.
#[allow(
    clippy::float_arithmetic,
    reason = "target sample-count formula is inherently floating-point (§4.B)"
)]
#[must_use]
pub fn target_sample_count(vertex_count: usize) -> u64 {
    if vertex_count == 0 {
        return 0;
    }
    let n = vertex_count as f64;
    n.powf(1.0 + EPSILON / 2.0).ceil() as u64
}

/// Distributes `total_samples` across per-worker total weights, proportional
/// to weight, by repeated sum-tree selection (§4.B weighted case).
///
/// Returns a quota vector of the same length as `worker_totals`.
#[must_use]
pub fn weighted_quotas(worker_totals: &[u64], total_samples: u64, rng: &mut impl Rng) -> Vec<u64> {
    let mut quotas = vec![0_u64; worker_totals.len()];
    if worker_totals.is_empty() || total_samples == 0 {
        return quotas;
    }

    let tree = SumTree::build(worker_totals);
    if tree.total() == 0 {
        // No weight anywhere: distribute as evenly as possible.
        let per = total_samples / worker_totals.len() as u64;
        let remainder = total_samples % worker_totals.len() as u64;
        for (i, q) in quotas.iter_mut().enumerate() {
            *q = per + u64::from((i as u64) < remainder);
        }
        return quotas;
    }

    for _ in 0..total_samples {
        let winner = tree.select(rng);
        quotas[winner] += 1;
    }
    quotas
}

/// Sparsity threshold below which a worker's slice is sent in its entirety
/// rather than sampled from (§4.B unweighted case): `ceil(3/delta^2 *
/// ln(p/0.9))`.
#[allow(
    clippy::float_arithmetic,
    reason = "sparsity threshold formula is inherently floating-point (§4.B)"
)]
#[must_use]
pub fn sparsity_threshold(worker_count: usize) -> u64 {
    if worker_count == 0 {
        return 0;
    }
    let p = worker_count as f64;
    (3.0 / (DELTA * DELTA) * (p / 0.9).ln()).ceil().max(0.0) as u64
}

/// Distributes a sample budget across unweighted per-worker slice sizes
/// (§4.B unweighted case): workers below [`sparsity_threshold`] contribute
/// their entire slice; the remaining budget — `ceil(S*(1+delta))` clipped to
/// the total edge count — is split proportionally to slice size among the
/// remaining workers, with any leftover assigned greedily.
#[must_use]
pub fn unweighted_quotas(slice_sizes: &[u64], vertex_count: usize) -> Vec<u64> {
    let worker_count = slice_sizes.len();
    let mut quotas = vec![0_u64; worker_count];
    if worker_count == 0 {
        return quotas;
    }

    let threshold = sparsity_threshold(worker_count);
    let total_edges: u64 = slice_sizes.iter().sum();
    let target = target_sample_count(vertex_count);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "budget scaling stays within u64 range for realistic edge counts"
    )]
    #[allow(
        clippy::float_arithmetic,
        reason = "budget scaling formula is inherently floating-point (§4.B)"
    )]
    let budget = ((target as f64) * (1.0 + DELTA)).ceil() as u64;
    let budget = budget.min(total_edges);

    let mut remaining_budget = budget;
    let mut eligible_total = 0_u64;
    for (i, &size) in slice_sizes.iter().enumerate() {
        if size <= threshold {
            quotas[i] = size;
            remaining_budget = remaining_budget.saturating_sub(size);
        } else {
            eligible_total += size;
        }
    }

    if eligible_total == 0 || remaining_budget == 0 {
        return quotas;
    }

    let mut assigned = 0_u64;
    for (i, &size) in slice_sizes.iter().enumerate() {
        if size > threshold {
            #[allow(
                clippy::integer_division,
                reason = "proportional share, remainder distributed below"
            )]
            let share = remaining_budget * size / eligible_total;
            let share = share.min(size);
            quotas[i] = share;
            assigned += share;
        }
    }

    let mut leftover = remaining_budget.saturating_sub(assigned);
    if leftover > 0 {
        for (i, &size) in slice_sizes.iter().enumerate() {
            if leftover == 0 {
                break;
            }
            if size > threshold && quotas[i] < size {
                let room = size - quotas[i];
                let give = room.min(leftover);
                quotas[i] += give;
                leftover -= give;
            }
        }
    }

    quotas
}
