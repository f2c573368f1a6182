//! Sequential disjoint-set union for incremental connectivity.
//!
//! Used by ISS's prefix connected-components scan and by RC's vertex-map
//! construction, both of which run single-threaded at a group's root (the
//! scan must stop at an exact component count, which is inherently
//! sequential). Grounded on the workspace's `ConcurrentUnionFind`: the same
//! path-compressing `find` and union-by-rank tie-break, simplified to plain
//! `Vec<usize>` storage since there is no concurrent mutation to guard
//! against here.

/// Plain union-by-rank, path-compressing disjoint-set union.
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
    components: usize,
}

impl DisjointSet {
    /// Creates `count` singleton components.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            rank: vec![0; count],
            components: count,
        }
    }

    /// Number of distinct components remaining.
    #[must_use]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Finds the representative of `node`'s component, compressing the path.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn find(&mut self, node: usize) -> usize {
        let mut current = node;
        while self.parent[current] != current {
            let grandparent = self.parent[self.parent[current]];
            self.parent[current] = grandparent;
            current = grandparent;
        }
        current
    }

    /// Unions the components containing `a` and `b`. Returns `true` if this
    /// merged two previously distinct components.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let (parent, child) = match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => (root_b, root_a),
            std::cmp::Ordering::Greater => (root_a, root_b),
            std::cmp::Ordering::Equal => (root_a, root_b),
        };
        self.parent[child] = parent;
        if self.rank[root_a] == self.rank[root_b] {
            self.rank[parent] += 1;
        }
        self.components -= 1;
        true
    }

    /// Relabels every node to a dense range `[0, components)`, preserving the
    /// ordering of first appearance among component representatives.
    #[must_use]
    pub fn labeling(&mut self) -> Vec<u32> {
        let mut next_label: Vec<Option<u32>> = vec![None; self.parent.len()];
        let mut labels = vec![0_u32; self.parent.len()];
        let mut count = 0_u32;
        for node in 0..self.parent.len() {
            let root = self.find(node);
            let label = *next_label[root].get_or_insert_with(|| {
                let label = count;
                count += 1;
                label
            });
            labels[node] = label;
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_start_as_own_components() {
        let dsu = DisjointSet::new(5);
        assert_eq!(dsu.components(), 5);
    }

    #[test]
    fn union_merges_and_decrements_count() {
        let mut dsu = DisjointSet::new(3);
        assert!(dsu.union(0, 1));
        assert_eq!(dsu.components(), 2);
        assert!(!dsu.union(0, 1));
        assert_eq!(dsu.components(), 2);
    }

    #[test]
    fn labeling_is_dense_and_consistent() {
        let mut dsu = DisjointSet::new(5);
        dsu.union(0, 2);
        dsu.union(1, 4);
        let labels = dsu.labeling();
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[1], labels[4]);
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[0], labels[3]);
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }
}
