//! Graph fixtures for the end-to-end minimum-cut scenarios.
//!
//! Each builder returns an in-memory [`GraphSource`] with a known minimum
//! cut, so behavioural tests across `mincut-core`, `mincut-cli`, and the
//! provider crates can assert against the same small set of graphs.

use mincut_core::{GraphSource, GraphSourceError, WeightedEdge, edge_slice_bounds};

/// An in-memory [`GraphSource`] backed by a plain `Vec<WeightedEdge>`.
pub struct FixtureGraphSource {
    name: &'static str,
    vertex_count: u64,
    edges: Vec<WeightedEdge>,
}

impl FixtureGraphSource {
    /// Wraps an edge list as a named [`GraphSource`].
    #[must_use]
    pub fn new(name: &'static str, vertex_count: u64, edges: Vec<WeightedEdge>) -> Self {
        Self {
            name,
            vertex_count,
            edges,
        }
    }
}

impl GraphSource for FixtureGraphSource {
    fn name(&self) -> &str {
        self.name
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

fn edges(triples: &[(u32, u32, u64)]) -> Vec<WeightedEdge> {
    triples
        .iter()
        .map(|&(u, v, w)| WeightedEdge::new(u, v, w))
        .collect()
}

/// Triangle with unit weights. n=3, m=3, min-cut = 2.
#[must_use]
pub fn triangle() -> FixtureGraphSource {
    FixtureGraphSource::new(
        "triangle",
        3,
        edges(&[(0, 1, 1), (1, 2, 1), (0, 2, 1)]),
    )
}

/// Two 3-cliques (internal edges weight 5) joined by a single weight-5
/// bridge. n=6, m=7, min-cut = 5: isolating any single vertex costs at least
/// 10 (two incident weight-5 clique edges), so the cheapest cut is the
/// bridge itself.
#[must_use]
pub fn two_triangles_bridged() -> FixtureGraphSource {
    FixtureGraphSource::new(
        "two-triangles-bridged",
        6,
        edges(&[
            (0, 1, 5),
            (1, 2, 5),
            (0, 2, 5),
            (3, 4, 5),
            (4, 5, 5),
            (3, 5, 5),
            (2, 3, 5),
        ]),
    )
}

/// Bipartite K_{3,3} with unit weights. n=6, m=9, min-cut = 3.
#[must_use]
pub fn bipartite_k33() -> FixtureGraphSource {
    let mut triples = Vec::with_capacity(9);
    for u in 0..3u32 {
        for v in 3..6u32 {
            triples.push((u, v, 1));
        }
    }
    FixtureGraphSource::new("bipartite-k33", 6, edges(&triples))
}

/// Two disjoint K_4's. n=8, m=12, min-cut = 0.
#[must_use]
pub fn disconnected_two_k4() -> FixtureGraphSource {
    let mut triples = Vec::with_capacity(12);
    for block in [0u32, 4u32] {
        for i in 0..4u32 {
            for j in (i + 1)..4u32 {
                triples.push((block + i, block + j, 1));
            }
        }
    }
    FixtureGraphSource::new("disconnected-two-k4", 8, edges(&triples))
}

/// Cycle of length `n` with unit weights. min-cut = 2 for any `n >= 3`.
#[must_use]
pub fn cycle(n: u32) -> FixtureGraphSource {
    let mut triples = Vec::with_capacity(n as usize);
    for i in 0..n {
        triples.push((i, (i + 1) % n, 1));
    }
    FixtureGraphSource::new("cycle", u64::from(n), edges(&triples))
}
