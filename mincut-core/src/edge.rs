//! Edge-slice store: a worker's local, unordered collection of weighted edges.
//!
//! An [`EdgeSlice`] normalizes, rewrites, and deduplicates edges in place. It
//! aliases an externally supplied edge list until the first mutation, using
//! `Cow` to avoid copying edge lists that are only ever read (e.g. an input
//! collaborator's freshly parsed slice that some workers never touch).

use std::borrow::Cow;

/// A single weighted, undirected edge. Canonical form has `from <= to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightedEdge {
    from: u32,
    to: u32,
    weight: u64,
}

impl WeightedEdge {
    /// Builds an edge, normalizing endpoints so that `from <= to`.
    #[must_use]
    pub fn new(u: u32, v: u32, weight: u64) -> Self {
        let (from, to) = if u <= v { (u, v) } else { (v, u) };
        Self { from, to, weight }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn from(self) -> u32 {
        self.from
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn to(self) -> u32 {
        self.to
    }

    /// The edge weight.
    #[must_use]
    pub const fn weight(self) -> u64 {
        self.weight
    }

    /// `true` if this edge is a self-loop (`from == to`).
    #[must_use]
    pub const fn is_loop(self) -> bool {
        self.from == self.to
    }
}

/// A worker-local, unordered collection of edges.
///
/// Until the first mutating call, `EdgeSlice` aliases the edge list it was
/// constructed from; `add_edge`, `apply_mapping`, and `finalize` each upgrade
/// the slice to owned storage before mutating.
#[derive(Clone, Debug, Default)]
pub struct EdgeSlice<'a> {
    edges: Cow<'a, [WeightedEdge]>,
}

impl<'a> EdgeSlice<'a> {
    /// Creates an empty slice.
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: Cow::Owned(Vec::new()),
        }
    }

    /// Borrows an externally owned edge list without copying it.
    #[must_use]
    pub fn from_edges(edges: &'a [WeightedEdge]) -> Self {
        Self {
            edges: Cow::Borrowed(edges),
        }
    }

    /// Takes ownership of an edge list without copying it.
    #[must_use]
    pub fn from_owned(edges: Vec<WeightedEdge>) -> Self {
        Self {
            edges: Cow::Owned(edges),
        }
    }

    /// Number of edges currently held (before `finalize` deduplicates them).
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// `true` if the slice holds no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Borrows the current edge list.
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Total weight of every edge in the slice.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges
            .iter()
            .fold(0_u64, |acc, e| acc.saturating_add(e.weight()))
    }

    /// Appends a (possibly non-normalized) edge. Amortized O(1).
    pub fn add_edge(&mut self, u: u32, v: u32, weight: u64) {
        self.edges.to_mut().push(WeightedEdge::new(u, v, weight));
    }

    /// Rewrites every endpoint through `map`, dropping edges that become
    /// loops. Parallel edges produced by the mapping are left for the next
    /// `finalize` to merge.
    ///
    /// # Panics
    ///
    /// Panics if an edge endpoint is out of bounds for `map` — this is a
    /// precondition violation (§7): the caller must guarantee `map` covers
    /// every vertex id currently present in the slice.
    pub fn apply_mapping(&mut self, map: &[u32]) {
        let owned = self.edges.to_mut();
        let mut rewritten = Vec::with_capacity(owned.len());
        for edge in owned.drain(..) {
            let from = map[edge.from() as usize];
            let to = map[edge.to() as usize];
            let mapped = WeightedEdge::new(from, to, edge.weight());
            if !mapped.is_loop() {
                rewritten.push(mapped);
            }
        }
        *owned = rewritten;
    }

    /// Sorts edges lexicographically by `(from, to)`, merges consecutive
    /// duplicates by summing weights, and drops loops. Idempotent.
    pub fn finalize(&mut self) {
        let owned = self.edges.to_mut();
        owned.retain(|e| !e.is_loop());
        owned.sort_unstable();

        let mut merged: Vec<WeightedEdge> = Vec::with_capacity(owned.len());
        for edge in owned.drain(..) {
            match merged.last_mut() {
                Some(last) if last.from() == edge.from() && last.to() == edge.to() => {
                    *last = WeightedEdge::new(
                        last.from(),
                        last.to(),
                        last.weight().saturating_add(edge.weight()),
                    );
                }
                _ => merged.push(edge),
            }
        }
        *owned = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_edge_normalizes_endpoints() {
        let edge = WeightedEdge::new(5, 2, 7);
        assert_eq!(edge.from(), 2);
        assert_eq!(edge.to(), 5);
        assert_eq!(edge.weight(), 7);
    }

    #[test]
    fn finalize_merges_duplicates_and_drops_loops() {
        let mut slice = EdgeSlice::new();
        slice.add_edge(0, 1, 3);
        slice.add_edge(1, 0, 4);
        slice.add_edge(2, 2, 10);
        slice.add_edge(1, 2, 1);

        slice.finalize();

        assert_eq!(
            slice.edges(),
            &[
                WeightedEdge::new(0, 1, 7),
                WeightedEdge::new(1, 2, 1),
            ]
        );
    }

    #[test]
    fn apply_mapping_drops_resulting_loops() {
        let mut slice = EdgeSlice::new();
        slice.add_edge(0, 1, 2);
        slice.add_edge(1, 2, 5);

        slice.apply_mapping(&[0, 0, 1]);

        assert_eq!(slice.edges(), &[WeightedEdge::new(0, 1, 5)]);
    }

    #[rstest]
    #[case::empty(&[], 0)]
    #[case::one(&[WeightedEdge::new(0, 1, 3)], 3)]
    #[case::two(&[WeightedEdge::new(0, 1, 3), WeightedEdge::new(1, 2, 4)], 7)]
    fn total_weight_sums_edges(#[case] edges: &[WeightedEdge], #[case] expected: u64) {
        let slice = EdgeSlice::from_edges(edges);
        assert_eq!(slice.total_weight(), expected);
    }

    #[test]
    fn from_edges_aliases_until_mutated() {
        let backing = [WeightedEdge::new(0, 1, 1)];
        let mut slice = EdgeSlice::from_edges(&backing);
        assert!(matches!(slice.edges, Cow::Borrowed(_)));
        slice.add_edge(2, 3, 1);
        assert!(matches!(slice.edges, Cow::Owned(_)));
    }
}
