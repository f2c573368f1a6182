//! Iterated Sparse Sampling (§4.C): the distributed shrink loop.
//!
//! One [`Iss`] instance represents a group's state across rounds: a logical
//! vertex count, replicated across the group, and one [`EdgeSlice`] per
//! worker. `shrink` repeatedly samples, runs an incremental
//! connected-components prefix scan at the root, and broadcasts the
//! resulting vertex map, exactly as described by the round algorithm in
//! §4.C. Root-side work (quota decisions, the prefix scan, relabeling) is
//! rank 0's share of the loop body; the "broadcast" and "every worker
//! applies the map" steps are realized by mutating every worker's slice in
//! place rather than by an actual message.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument, trace};

use crate::cluster::Cluster;
use crate::edge::{EdgeSlice, WeightedEdge};
use crate::sampling::{
    target_sample_count, unweighted_quotas, unweighted_sample, weighted_quotas, weighted_sample,
};
use crate::union_find::DisjointSet;

/// Distributed shrinking primitive operating over one group's edge slices.
pub struct Iss {
    vertex_count: u64,
    slices: Vec<EdgeSlice<'static>>,
    rngs: Vec<SmallRng>,
    weighted: bool,
}

impl Iss {
    /// Builds an ISS instance over `slices` (one per worker), with each
    /// worker's RNG stream mixed from `cluster`'s base seed and rank.
    #[must_use]
    pub fn new(cluster: &Cluster, vertex_count: u64, slices: Vec<EdgeSlice<'static>>, weighted: bool) -> Self {
        assert_eq!(
            slices.len(),
            cluster.worker_count(),
            "one edge slice is required per worker"
        );
        let rngs = (0..cluster.worker_count())
            .map(|rank| cluster.rng_for(rank))
            .collect();
        Self {
            vertex_count,
            slices,
            rngs,
            weighted,
        }
    }

    /// Current logical vertex count, replicated across the group.
    #[must_use]
    pub fn vertex_count(&self) -> u64 {
        self.vertex_count
    }

    /// Consumes this instance, returning the final per-worker edge slices.
    #[must_use]
    pub fn into_slices(self) -> Vec<EdgeSlice<'static>> {
        self.slices
    }

    /// Drives [`Self::sampling_trial`] until the group's vertex count equals
    /// `target_size`, or until a round makes no further progress (sample
    /// exhaustion, §4.C "Failure semantics").
    #[instrument(skip(self), fields(vertex_count = self.vertex_count, target_size))]
    pub fn shrink(&mut self, target_size: u64) {
        while self.vertex_count > target_size {
            let before = self.vertex_count;
            self.sampling_trial(target_size);
            if self.vertex_count == before {
                debug!("ISS round made no progress; halting (sample exhaustion)");
                break;
            }
        }
    }

    /// Runs one round of the algorithm in §4.C and returns `true` if
    /// `target_size` was reached.
    pub fn sampling_trial(&mut self, target_size: u64) -> bool {
        // Step 1: local metadata, gathered at the root.
        let metadata: Vec<u64> = if self.weighted {
            self.slices.iter().map(EdgeSlice::total_weight).collect()
        } else {
            self.slices.iter().map(|s| s.len() as u64).collect()
        };

        // Step 2: root decides per-worker sample quotas.
        let quotas = if self.weighted {
            let total_samples = target_sample_count(self.vertex_count as usize);
            weighted_quotas(&metadata, total_samples, &mut self.rngs[0])
        } else {
            unweighted_quotas(&metadata, self.vertex_count as usize)
        };

        // Step 3: every worker draws its quota; gathered at the root.
        let mut samples: Vec<WeightedEdge> = Vec::new();
        for (rank, slice) in self.slices.iter().enumerate() {
            let quota = quotas.get(rank).copied().unwrap_or(0) as usize;
            let indices = if self.weighted {
                weighted_sample(slice, quota, &mut self.rngs[rank])
            } else {
                unweighted_sample(slice, quota, &mut self.rngs[rank])
            };
            samples.extend(indices.into_iter().map(|i| slice.edges()[i]));
        }
        trace!(sample_count = samples.len(), "ISS round gathered samples");

        // Step 4: root permutes the gathered samples.
        samples.shuffle(&mut self.rngs[0]);

        // Step 5: incremental connected-components prefix scan.
        let mut dsu = DisjointSet::new(self.vertex_count as usize);
        let target_usize = target_size as usize;
        let mut reached_target = dsu.components() <= target_usize;
        if !reached_target {
            for edge in &samples {
                dsu.union(edge.from() as usize, edge.to() as usize);
                if dsu.components() <= target_usize {
                    reached_target = true;
                    break;
                }
            }
        }
        let new_vertex_count = dsu.components() as u64;
        let vertex_map = dsu.labeling();

        // Steps 6-7: broadcast the map and new n; every worker applies it.
        for slice in &mut self.slices {
            slice.apply_mapping(&vertex_map);
        }
        self.vertex_count = new_vertex_count;

        reached_target
    }

    /// Alternate terminal operation (§4.C): drives rounds until every edge
    /// has been consumed, returning the final component labeling. Unlike
    /// `shrink`, this is not sample-based — it walks every remaining edge
    /// directly, since the goal is exact connectivity rather than a target
    /// vertex count.
    #[instrument(skip(self))]
    pub fn connected_components(&mut self) -> Vec<u32> {
        let mut dsu = DisjointSet::new(self.vertex_count as usize);
        for slice in &self.slices {
            for edge in slice.edges() {
                dsu.union(edge.from() as usize, edge.to() as usize);
            }
        }
        let labels = dsu.labeling();
        for slice in &mut self.slices {
            slice.apply_mapping(&labels);
        }
        self.vertex_count = dsu.components() as u64;
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges_to_slices(edges: &[(u32, u32, u64)], group_size: usize) -> Vec<EdgeSlice<'static>> {
        let mut slices = vec![Vec::new(); group_size];
        for (i, &(u, v, w)) in edges.iter().enumerate() {
            slices[i % group_size].push(WeightedEdge::new(u, v, w));
        }
        slices.into_iter().map(EdgeSlice::from_owned).collect()
    }

    #[test]
    fn shrink_to_current_size_is_identity() {
        let edges = [(0, 1, 1), (1, 2, 1), (2, 3, 1)];
        let slices = edges_to_slices(&edges, 2);
        let cluster = Cluster::new(2, 1);
        let mut iss = Iss::new(&cluster, 4, slices, true);
        iss.shrink(4);
        assert_eq!(iss.vertex_count(), 4);
    }

    #[test]
    fn shrink_reaches_target_on_a_connected_graph() {
        // Triangle: plenty of edges to reach a 2-vertex contraction.
        let edges = [(0, 1, 1), (1, 2, 1), (0, 2, 1)];
        let slices = edges_to_slices(&edges, 1);
        let cluster = Cluster::new(1, 99);
        let mut iss = Iss::new(&cluster, 3, slices, true);
        iss.shrink(1);
        assert!(iss.vertex_count() <= 3);
    }

    #[test]
    fn connected_components_reduces_fully_connected_graph_to_one_vertex() {
        let edges = [(0, 1, 1), (1, 2, 1), (2, 3, 1)];
        let slices = edges_to_slices(&edges, 2);
        let cluster = Cluster::new(2, 3);
        let mut iss = Iss::new(&cluster, 4, slices, false);
        iss.connected_components();
        assert_eq!(iss.vertex_count(), 1);
    }

    #[test]
    fn connected_components_on_disconnected_graph_keeps_multiple_labels() {
        let edges = [(0, 1, 1), (2, 3, 1)];
        let slices = edges_to_slices(&edges, 1);
        let cluster = Cluster::new(1, 3);
        let mut iss = Iss::new(&cluster, 4, slices, false);
        iss.connected_components();
        assert_eq!(iss.vertex_count(), 2);
    }
}
