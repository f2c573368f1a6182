//! CLICK-model synthetic graph generator.
//!
//! Named a "provider" to follow the workspace's swappable-data-source
//! naming convention, out of `mincut-core`'s scope but shipped so the CLI
//! can exercise the solver without a pre-existing input file.

#![cfg_attr(not(any(test, doctest)), forbid(clippy::expect_used))]

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};

use mincut_core::{GraphSource, GraphSourceError, WeightedEdge, edge_slice_bounds};

const SAME_CLUSTER_MEAN: f64 = 8.0;
const CROSS_CLUSTER_MEAN: f64 = 4.0;
const WEIGHT_STD: f64 = 4.0;

/// A complete graph over `n` vertices grouped into `s` clusters by `v mod s`,
/// with same-cluster and cross-cluster edge weights drawn from two normal
/// distributions, clipped to non-negative and rounded to the nearest
/// integer.
///
/// Generation is deterministic given `(n, clusters, seed)`: two
/// [`ClickGraphSource`]s built from the same parameters produce byte-for-byte
/// identical edge lists.
pub struct ClickGraphSource {
    name: String,
    vertex_count: u64,
    edges: Vec<WeightedEdge>,
}

impl ClickGraphSource {
    /// Builds a complete graph over `vertex_count` vertices, partitioned into
    /// `clusters` groups by `v mod clusters`, with weights drawn
    /// deterministically from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex_count` is zero or `clusters` is zero.
    ///
    /// # Examples
    /// ```
    /// use mincut_providers_click::ClickGraphSource;
    ///
    /// let source = ClickGraphSource::new(200, 10, 42);
    /// assert_eq!(source.vertex_count(), 200);
    ///
    /// let other = ClickGraphSource::new(200, 10, 42);
    /// assert_eq!(source.edges(), other.edges());
    /// ```
    #[allow(
        clippy::float_arithmetic,
        reason = "edge weights are sampled from normal distributions over f64"
    )]
    #[must_use]
    pub fn new(vertex_count: u64, clusters: u64, seed: u64) -> Self {
        assert!(vertex_count > 0, "CLICK model requires at least one vertex");
        assert!(clusters > 0, "CLICK model requires at least one cluster");

        let mut rng = SmallRng::seed_from_u64(seed);
        let same = Normal::new(SAME_CLUSTER_MEAN, WEIGHT_STD)
            .expect("fixed mean/std parameterize a valid normal distribution");
        let cross = Normal::new(CROSS_CLUSTER_MEAN, WEIGHT_STD)
            .expect("fixed mean/std parameterize a valid normal distribution");

        #[allow(
            clippy::cast_possible_truncation,
            reason = "vertex counts in synthetic graphs fit comfortably in u32"
        )]
        let mut edges = Vec::new();
        for u in 0..vertex_count {
            for v in (u + 1)..vertex_count {
                let distribution = if u % clusters == v % clusters { &same } else { &cross };
                let sample = distribution.sample(&mut rng).max(0.0).round();
                #[allow(
                    clippy::cast_sign_loss,
                    clippy::cast_possible_truncation,
                    reason = "sample was clamped to non-negative above"
                )]
                let weight = sample as u64;
                if weight == 0 {
                    continue;
                }
                edges.push(WeightedEdge::new(u as u32, v as u32, weight));
            }
        }

        Self {
            name: format!("click-n{vertex_count}-s{clusters}-seed{seed}"),
            vertex_count,
            edges,
        }
    }

    /// The generated edge list, in deterministic generation order.
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }
}

impl GraphSource for ClickGraphSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> u64 {
        self.vertex_count
    }

    fn edge_count(&self) -> u64 {
        self.edges.len() as u64
    }

    fn slice(&self, rank: usize, group_size: usize) -> Result<Vec<WeightedEdge>, GraphSourceError> {
        let (start, end) = edge_slice_bounds(self.edge_count(), rank, group_size)?;
        Ok(self.edges[start as usize..end as usize].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic_given_the_same_seed() {
        let a = ClickGraphSource::new(50, 5, 42);
        let b = ClickGraphSource::new(50, 5, 42);
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn different_seeds_produce_different_weights() {
        let a = ClickGraphSource::new(50, 5, 1);
        let b = ClickGraphSource::new(50, 5, 2);
        assert_ne!(a.edges(), b.edges());
    }

    #[test]
    fn every_weight_is_non_negative_by_construction() {
        let source = ClickGraphSource::new(30, 3, 7);
        for edge in source.edges() {
            assert!(edge.weight() < u64::MAX);
        }
    }

    #[test]
    #[allow(
        clippy::float_arithmetic,
        reason = "computing a sample mean to compare distribution trends"
    )]
    fn same_cluster_edges_trend_heavier_than_cross_cluster_edges() {
        let source = ClickGraphSource::new(400, 4, 11);
        let mut same_total: u128 = 0;
        let mut same_count: u128 = 0;
        let mut cross_total: u128 = 0;
        let mut cross_count: u128 = 0;
        for edge in source.edges() {
            let same_cluster = edge.from() % 4 == edge.to() % 4;
            if same_cluster {
                same_total += u128::from(edge.weight());
                same_count += 1;
            } else {
                cross_total += u128::from(edge.weight());
                cross_count += 1;
            }
        }
        let same_mean = same_total as f64 / same_count.max(1) as f64;
        let cross_mean = cross_total as f64 / cross_count.max(1) as f64;
        assert!(same_mean > cross_mean);
    }

    #[test]
    fn slice_matches_edge_slice_bounds() {
        let source = ClickGraphSource::new(20, 4, 3);
        let first = source.slice(0, 3).unwrap();
        let second = source.slice(1, 3).unwrap();
        let third = source.slice(2, 3).unwrap();
        assert_eq!(
            first.len() + second.len() + third.len(),
            source.edge_count() as usize
        );
    }

    #[test]
    fn name_encodes_the_generation_parameters() {
        let source = ClickGraphSource::new(200, 10, 42);
        assert_eq!(source.name(), "click-n200-s10-seed42");
    }
}
