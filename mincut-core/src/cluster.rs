//! In-process simulation of an MPI-style world of worker processes (§2).
//!
//! This workspace has no MPI binding, and none exists anywhere in the corpus
//! this crate is grounded on. Every "worker" named throughout §4 is realized
//! here as one logical member of a [`Cluster`]; every collective (broadcast,
//! gather, scatter, all-to-all, reduce) is a plain function over owned
//! per-worker data, with per-worker local work dispatched through `rayon`
//! exactly where the workspace's own parallel Kruskal construction dispatches
//! per-edge work.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use tracing::trace;

/// Mixes a base seed with a worker rank into an independent 64-bit seed.
///
/// A SplitMix64 round: a fixed odd increment scaled by the rank, followed by
/// the standard SplitMix64 avalanche, so that adjacent ranks produce
/// uncorrelated streams even though they share `base_seed`. This generalizes
/// the workspace's HNSW worker-seed mixer from `u32` worker indices to the
/// `usize` ranks used by the cluster simulation.
#[must_use]
pub fn mix_worker_seed(base_seed: u64, rank: usize) -> u64 {
    const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    #[allow(
        clippy::cast_possible_truncation,
        reason = "rank is bounded by realistic worker counts, wrapping is the intended mix"
    )]
    let mut z = base_seed.wrapping_add((rank as u64).wrapping_mul(GOLDEN_GAMMA));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Builds a worker-local PRNG stream from a base seed and rank.
#[must_use]
pub fn worker_rng(base_seed: u64, rank: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_worker_seed(base_seed, rank))
}

/// Accumulates wall-clock time spent in simulated collectives, separately
/// from time spent on local computation, so [`crate::CutReport`] can report
/// both (§6).
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectiveTimer {
    total: std::time::Duration,
}

impl CollectiveTimer {
    /// Creates a zeroed timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `f` and accumulates its duration.
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = std::time::Instant::now();
        let result = f();
        self.total += start.elapsed();
        result
    }

    /// Total accumulated time.
    #[must_use]
    pub fn total(&self) -> std::time::Duration {
        self.total
    }

    /// Merges another timer's accumulated time into this one.
    pub fn merge(&mut self, other: &CollectiveTimer) {
        self.total += other.total;
    }
}

/// A `Cluster` describes the shape of one simulated SPMD group: how many
/// workers it has and the base seed from which their RNG streams are mixed.
/// It owns no per-phase data — ISS, RC, and the orchestrator each carry their
/// own `Vec<T>` of per-worker state and use the free functions below to move
/// data between "root" and "workers" the way an MPI collective would.
#[derive(Debug, Clone, Copy)]
pub struct Cluster {
    worker_count: usize,
    base_seed: u64,
}

impl Cluster {
    /// Creates a cluster of `worker_count` simulated workers.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is zero — a cluster precondition violation
    /// (§7), since every collective in §4 assumes at least a root.
    #[must_use]
    pub fn new(worker_count: usize, base_seed: u64) -> Self {
        assert!(worker_count > 0, "cluster must have at least one worker");
        Self {
            worker_count,
            base_seed,
        }
    }

    /// Number of simulated workers in this cluster.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// The base seed workers mix their individual streams from.
    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Returns a fresh worker-local RNG for `rank`.
    #[must_use]
    pub fn rng_for(&self, rank: usize) -> SmallRng {
        worker_rng(self.base_seed, rank)
    }

    /// Splits this cluster in half, returning `(bottom, top)` clusters of
    /// `worker_count / 2` workers each, reusing the same base seed (ranks
    /// re-index from zero within each half, matching the original
    /// `reassign_graph`/`duplicate_graph` group-halving semantics of §4.D).
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is not even — group halving is only defined
    /// for even-sized power-of-two groups (§4.D).
    #[must_use]
    pub fn halve(&self) -> (Cluster, Cluster) {
        assert!(
            self.worker_count % 2 == 0,
            "cannot halve a cluster with an odd worker count"
        );
        let half = self.worker_count / 2;
        (
            Cluster::new(half, self.base_seed),
            Cluster::new(half, self.base_seed ^ 0x5DEE_CE9A_6D3F_2B17),
        )
    }
}

/// Broadcasts `value` to every worker in a cluster of `worker_count`
/// members (§4.C step 6, §4.E "rank 0 ... broadcasts").
#[must_use]
pub fn broadcast<T: Clone>(value: &T, worker_count: usize) -> Vec<T> {
    trace!(worker_count, "broadcast");
    vec![value.clone(); worker_count]
}

/// Gathers one value per worker at the root. In this in-process simulation
/// every worker's contribution is already available to the caller, so this
/// is the identity — its purpose is purely to name the collective at call
/// sites for readability and tracing.
#[must_use]
pub fn gather<T>(values: Vec<T>) -> Vec<T> {
    trace!(count = values.len(), "gather");
    values
}

/// Applies `f` to every worker's local state in parallel and collects the
/// results, mirroring the per-worker local-computation step that precedes
/// most collectives in §4.C/§4.D.
pub fn map_workers<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync,
{
    items
        .par_iter()
        .enumerate()
        .map(|(rank, item)| f(rank, item))
        .collect()
}

/// Reduces a vector of one candidate weight per worker to their minimum
/// (§4.E "global min reduction"). Returns `u64::MAX` for an empty input,
/// matching the sentinel contributed by the "odd" group (§9).
#[must_use]
pub fn reduce_min(values: &[u64]) -> u64 {
    trace!(count = values.len(), "reduce_min");
    values.iter().copied().min().unwrap_or(u64::MAX)
}
