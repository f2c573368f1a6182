//! Sequential base case run by a singleton worker once RC group-halving
//! bottoms out (§4.D "base case").
//!
//! Below the configured vertex/edge thresholds the exact answer is cheap
//! enough to compute directly, so [`solve`] prefers the deterministic
//! Stoer-Wagner algorithm; above them it falls back to sequential
//! Karger-Stein recursive contraction (a single trial — the surrounding RC
//! recursion already supplies the repetition needed for a success-probability
//! guarantee), preceded by Padberg-Rinaldi preprocessing to shrink the graph
//! by merging vertex pairs no minimum cut can separate.

use rand::Rng;

use crate::dense_matrix::DenseMatrix;
use crate::trial_config::TrialConfig;

/// Maximum number of Padberg-Rinaldi merge rounds to attempt before giving up
/// and handing the (possibly still-unmerged) graph to the contraction loop.
const PR_MAX_ROUNDS: u32 = 32;

fn count_edges(matrix: &DenseMatrix) -> usize {
    let width = matrix.padded_width();
    let mut count = 0;
    for i in 0..width {
        for j in (i + 1)..width {
            if matrix.get(i, j) > 0 {
                count += 1;
            }
        }
    }
    count
}

/// Merges vertex pairs `(u, v)` whose edge weight is at least half of both
/// endpoints' total incident weight — such an edge is never cut by any
/// minimum cut, so identifying its endpoints is always safe. Repeats until a
/// round makes no further merges or [`PR_MAX_ROUNDS`] is reached.
#[must_use]
fn pr_preprocess(matrix: &DenseMatrix) -> DenseMatrix {
    let mut current = matrix.clone();

    for _ in 0..PR_MAX_ROUNDS {
        let width = current.padded_width();
        if width < 2 {
            break;
        }

        let degree: Vec<u64> = (0..width)
            .map(|i| (0..width).filter(|&j| j != i).map(|j| current.get(i, j)).sum())
            .collect();

        let mut id_for: Vec<u32> = (0..width as u32).collect();
        let mut merged_any = false;
        for i in 0..width {
            for j in (i + 1)..width {
                if id_for[i] != i as u32 || id_for[j] != j as u32 {
                    // Either endpoint already claimed by an earlier merge
                    // this round; defer to the next round.
                    continue;
                }
                let w = current.get(i, j);
                if w == 0 {
                    continue;
                }
                if 2 * w >= degree[i] && 2 * w >= degree[j] {
                    id_for[j] = id_for[i];
                    merged_any = true;
                }
            }
        }

        if !merged_any {
            break;
        }

        // Relabel to a dense `0..next_id` range.
        let mut relabel = vec![u32::MAX; width];
        let mut next_id = 0_u32;
        let mut new_map = vec![0_u32; width];
        for v in 0..width {
            let root = id_for[v] as usize;
            if relabel[root] == u32::MAX {
                relabel[root] = next_id;
                next_id += 1;
            }
            new_map[v] = relabel[root];
        }

        let group_size = current.group_size();
        current = current.contract(&new_map, next_id as usize, group_size);
    }

    current
}

/// Contracts the single pair `(i, j)` in `matrix`, merging `j` into `i`'s
/// identity and re-densifying every other vertex's id.
#[must_use]
fn contract_pair(matrix: &DenseMatrix, i: usize, j: usize) -> DenseMatrix {
    let width = matrix.padded_width();
    let other = i.max(j);
    let target = i.min(j);

    let mut id_for = vec![u32::MAX; width];
    let mut next_id = 0_u32;
    for v in 0..width {
        if v == other {
            continue;
        }
        id_for[v] = next_id;
        next_id += 1;
    }
    id_for[other] = id_for[target];

    matrix.contract(&id_for, next_id as usize, matrix.group_size())
}

/// Runs sequential Karger-Stein recursive contraction to a single candidate
/// cut weight: repeatedly samples one edge weighted by weight and contracts
/// it until two vertices remain, returning the weight between them.
#[must_use]
pub fn karger_stein_contract(matrix: &DenseMatrix, rng: &mut impl Rng) -> u64 {
    let mut current = pr_preprocess(matrix);

    while current.logical_vertex_count() > 2 {
        let sampled = current.sample_edges(1, rng);
        let Some(&(i, j)) = sampled.first() else {
            break;
        };
        current = contract_pair(&current, i, j);
    }

    current.total_weight()
}

/// Deterministic minimum cut via the Stoer-Wagner algorithm, operating over
/// the matrix's logical (unpadded) vertices.
#[must_use]
pub fn stoer_wagner(matrix: &DenseMatrix) -> u64 {
    let n = matrix.logical_vertex_count();
    if n < 2 {
        return 0;
    }

    let mut w = vec![vec![0_u64; n]; n];
    for (i, row) in w.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = matrix.get(i, j);
        }
    }

    let mut active: Vec<usize> = (0..n).collect();
    let mut best = u64::MAX;

    while active.len() > 1 {
        let m = active.len();
        let mut in_a = vec![false; m];
        let mut weights = vec![0_u64; m];
        let mut order = Vec::with_capacity(m);

        for _ in 0..m {
            let mut sel = 0;
            let mut sel_found = false;
            for idx in 0..m {
                if !in_a[idx] && (!sel_found || weights[idx] > weights[sel]) {
                    sel = idx;
                    sel_found = true;
                }
            }
            in_a[sel] = true;
            order.push(sel);
            for idx in 0..m {
                if !in_a[idx] {
                    weights[idx] += w[active[sel]][active[idx]];
                }
            }
        }

        let t_idx = order[m - 1];
        let s_idx = order[m - 2];
        best = best.min(weights[t_idx]);

        let t = active[t_idx];
        let s = active[s_idx];
        for k in 0..n {
            w[t][k] = w[t][k].saturating_add(w[s][k]);
            w[k][t] = w[k][t].saturating_add(w[k][s]);
        }
        active.retain(|&v| v != s);
    }

    best
}

/// Solves the base case: exact Stoer-Wagner below the configured
/// vertex/edge thresholds, otherwise one sequential Karger-Stein trial.
#[must_use]
pub fn solve(matrix: &DenseMatrix, config: &TrialConfig, rng: &mut impl Rng) -> u64 {
    let n = matrix.logical_vertex_count();
    if n < 2 {
        return 0;
    }

    if n <= config.max_base_case_vertices() && count_edges(matrix) <= config.max_base_case_edges() {
        stoer_wagner(matrix)
    } else {
        karger_stein_contract(matrix, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{EdgeSlice, WeightedEdge};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn triangle() -> DenseMatrix {
        let slice = EdgeSlice::from_owned(vec![
            WeightedEdge::new(0, 1, 1),
            WeightedEdge::new(1, 2, 1),
            WeightedEdge::new(0, 2, 1),
        ]);
        DenseMatrix::from_slices(&[slice], 3, 1)
    }

    fn two_triangles_bridged() -> DenseMatrix {
        // Two triangles {0,1,2} and {3,4,5} joined by a single bridge edge
        // (2,3) of weight 1: the true min cut is 1.
        let edges = [
            (0, 1, 5),
            (1, 2, 5),
            (0, 2, 5),
            (3, 4, 5),
            (4, 5, 5),
            (3, 5, 5),
            (2, 3, 1),
        ];
        let slice = EdgeSlice::from_owned(
            edges.iter().map(|&(u, v, w)| WeightedEdge::new(u, v, w)).collect(),
        );
        DenseMatrix::from_slices(&[slice], 6, 1)
    }

    #[test]
    fn stoer_wagner_finds_triangle_min_cut() {
        let matrix = triangle();
        assert_eq!(stoer_wagner(&matrix), 2);
    }

    #[test]
    fn stoer_wagner_finds_bridge_min_cut() {
        let matrix = two_triangles_bridged();
        assert_eq!(stoer_wagner(&matrix), 1);
    }

    #[test]
    fn stoer_wagner_single_vertex_is_zero() {
        let slice = EdgeSlice::from_owned(vec![]);
        let matrix = DenseMatrix::from_slices(&[slice], 1, 1);
        assert_eq!(stoer_wagner(&matrix), 0);
    }

    #[test]
    fn karger_stein_never_undershoots_the_true_min_cut() {
        let matrix = two_triangles_bridged();
        let mut rng = SmallRng::seed_from_u64(123);
        for seed in 0..20 {
            rng = SmallRng::seed_from_u64(seed);
            let candidate = karger_stein_contract(&matrix, &mut rng);
            assert!(candidate >= 1);
        }
    }

    #[test]
    fn pr_preprocess_shrinks_a_dominant_bridge_graph() {
        let matrix = two_triangles_bridged();
        let preprocessed = pr_preprocess(&matrix);
        assert!(preprocessed.logical_vertex_count() <= matrix.logical_vertex_count());
    }

    #[test]
    fn solve_picks_exact_stoer_wagner_below_thresholds() {
        use crate::builder::TrialConfigBuilder;
        let matrix = triangle();
        let config = TrialConfigBuilder::new().build().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(solve(&matrix, &config, &mut rng), 2);
    }
}
