//! Dense-matrix reduce (§4.D "Reduce") and the row-striped matrix itself.
//!
//! In a real deployment the reduce step is a distributed sample sort plus
//! boundary reconciliation across many workers' edge slices, landing on a
//! globally sorted, deduplicated edge sequence that is then scattered into a
//! row-striped dense matrix. This in-process simulation has only one
//! process, so the distributed mechanics collapse to their outcome: every
//! worker's slice is gathered, globally sorted and merged by
//! [`crate::edge::EdgeSlice::finalize`] (which is exactly what the sample
//! sort + boundary reconciliation pipeline computes), then scattered into
//! the matrix. `row_owner` still reports which simulated worker a row
//! belongs to, so the group-halving logic in `rc` can reason about
//! ownership as if the matrix really were distributed.

use crate::edge::{EdgeSlice, WeightedEdge};
use crate::sampling::SumTree;
use rand::Rng;

/// A symmetric, diagonal-zero, row-striped dense adjacency matrix (§3).
#[derive(Clone, Debug)]
pub struct DenseMatrix {
    /// Logical vertex count before padding.
    logical_n: usize,
    /// Padded width `n'' = k * group_size`.
    padded_n: usize,
    /// Number of simulated workers the matrix is striped across.
    group_size: usize,
    data: Vec<u64>,
}

impl DenseMatrix {
    /// Builds a matrix by gathering, globally sorting, and scattering the
    /// edges of every worker's slice (§4.D reduce steps 1-5).
    #[must_use]
    pub fn from_slices(slices: &[EdgeSlice<'_>], logical_n: usize, group_size: usize) -> Self {
        let mut merged = EdgeSlice::from_owned(
            slices
                .iter()
                .flat_map(|s| s.edges().iter().copied())
                .collect(),
        );
        merged.finalize();

        let group_size = group_size.max(1);
        let rows_per_worker = logical_n.div_ceil(group_size);
        let padded_n = rows_per_worker.saturating_mul(group_size).max(1);

        let mut data = vec![0_u64; padded_n * padded_n];
        for edge in merged.edges() {
            let (i, j) = (edge.from() as usize, edge.to() as usize);
            if i < padded_n && j < padded_n {
                data[i * padded_n + j] = data[i * padded_n + j].saturating_add(edge.weight());
                data[j * padded_n + i] = data[j * padded_n + i].saturating_add(edge.weight());
            }
        }

        Self {
            logical_n,
            padded_n,
            group_size,
            data,
        }
    }

    /// Logical vertex count (excludes padding rows/columns).
    #[must_use]
    pub fn logical_vertex_count(&self) -> usize {
        self.logical_n
    }

    /// Padded matrix width `n''`.
    #[must_use]
    pub fn padded_width(&self) -> usize {
        self.padded_n
    }

    /// Number of simulated workers the matrix is striped across.
    #[must_use]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Which worker owns row `i` (`floor(i / k)`, §4.D).
    #[must_use]
    pub fn row_owner(&self, row: usize) -> usize {
        let rows_per_worker = self.padded_n.div_ceil(self.group_size.max(1)).max(1);
        (row / rows_per_worker).min(self.group_size.saturating_sub(1))
    }

    /// Reads entry `(i, j)`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.data[i * self.padded_n + j]
    }

    /// `true` if the matrix is symmetric and diagonal-zero.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        for i in 0..self.padded_n {
            if self.get(i, i) != 0 {
                return false;
            }
            for j in (i + 1)..self.padded_n {
                if self.get(i, j) != self.get(j, i) {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of every off-diagonal entry's weight (each undirected edge
    /// counted once, i.e. half of the symmetric total).
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        let mut total = 0_u64;
        for i in 0..self.padded_n {
            for j in (i + 1)..self.padded_n {
                total = total.saturating_add(self.get(i, j));
            }
        }
        total
    }

    /// Draws `k` `(row, col)` pairs weighted by entry weight, from the upper
    /// triangle only (§4.D step 1). Collapses the two-level (row-sum,
    /// within-row) prefix index into one flat `SumTree` over all
    /// off-diagonal entries, since there is no per-worker partition to
    /// exploit in this simulation.
    #[must_use]
    pub fn sample_edges(&self, k: usize, rng: &mut impl Rng) -> Vec<(usize, usize)> {
        let n = self.padded_n;
        let mut pairs = Vec::new();
        let mut weights = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let w = self.get(i, j);
                if w > 0 {
                    pairs.push((i, j));
                    weights.push(w);
                }
            }
        }
        if pairs.is_empty() {
            return Vec::new();
        }
        let tree = SumTree::build(&weights);
        (0..k).map(|_| pairs[tree.select(rng)]).collect()
    }

    /// Contracts the matrix according to `vertex_map` (length `padded_n`,
    /// values in `[0, new_n)`): off-diagonal weights between two entries
    /// mapping to the same destination are dropped (loop); otherwise summed
    /// into the destination cell (§4.D step 3, "contract columns ... zero
    /// the diagonal"). Equivalent to the original's
    /// contract-transpose-contract-transpose dance, collapsed into one pass
    /// since the matrix is not actually distributed here.
    #[must_use]
    pub fn contract(&self, vertex_map: &[u32], new_logical_n: usize, new_group_size: usize) -> Self {
        let new_group_size = new_group_size.max(1);
        let rows_per_worker = new_logical_n.div_ceil(new_group_size);
        let new_padded_n = rows_per_worker.saturating_mul(new_group_size).max(1);

        let mut data = vec![0_u64; new_padded_n * new_padded_n];
        for i in 0..self.padded_n {
            let mapped_i = *vertex_map.get(i).unwrap_or(&0) as usize;
            for j in (i + 1)..self.padded_n {
                let w = self.get(i, j);
                if w == 0 {
                    continue;
                }
                let mapped_j = *vertex_map.get(j).unwrap_or(&0) as usize;
                if mapped_i == mapped_j || mapped_i >= new_padded_n || mapped_j >= new_padded_n {
                    continue;
                }
                data[mapped_i * new_padded_n + mapped_j] =
                    data[mapped_i * new_padded_n + mapped_j].saturating_add(w);
                data[mapped_j * new_padded_n + mapped_i] =
                    data[mapped_j * new_padded_n + mapped_i].saturating_add(w);
            }
        }

        Self {
            logical_n: new_logical_n,
            padded_n: new_padded_n,
            group_size: new_group_size,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn triangle() -> Vec<EdgeSlice<'static>> {
        vec![EdgeSlice::from_owned(vec![
            WeightedEdge::new(0, 1, 1),
            WeightedEdge::new(1, 2, 1),
            WeightedEdge::new(0, 2, 1),
        ])]
    }

    #[test]
    fn from_slices_builds_symmetric_zero_diagonal_matrix() {
        let matrix = DenseMatrix::from_slices(&triangle(), 3, 1);
        assert!(matrix.is_well_formed());
        assert_eq!(matrix.total_weight(), 3);
    }

    #[test]
    fn row_owner_distributes_rows_across_group() {
        let matrix = DenseMatrix::from_slices(&triangle(), 4, 2);
        assert_eq!(matrix.row_owner(0), 0);
        assert_eq!(matrix.row_owner(matrix.padded_width() - 1), 1);
    }

    #[test]
    fn contract_merges_identified_vertices() {
        let matrix = DenseMatrix::from_slices(&triangle(), 3, 1);
        // Merge vertex 0 and 1 into vertex 0; vertex 2 becomes vertex 1.
        let contracted = matrix.contract(&[0, 0, 1], 2, 1);
        assert!(contracted.is_well_formed());
        // Edge (0,2)+（1,2) both map to (0,1): weight sums to 2.
        assert_eq!(contracted.get(0, 1), 2);
    }

    #[test]
    fn sample_edges_only_returns_nonzero_pairs() {
        let matrix = DenseMatrix::from_slices(&triangle(), 3, 1);
        let mut rng = SmallRng::seed_from_u64(11);
        let samples = matrix.sample_edges(20, &mut rng);
        for (i, j) in samples {
            assert!(matrix.get(i, j) > 0);
        }
    }
}
