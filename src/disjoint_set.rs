//! Union-find over flattened cell indices

use petgraph::unionfind::UnionFind;

/// Disjoint sets of cell indices
///
/// Backed by petgraph's [`UnionFind`], which compresses paths on
/// [`Self::find`] and unions by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    sets: UnionFind<usize>,
    len: usize,
}

impl DisjointSet {
    /// Create `n` singleton sets `{0}, {1}, ..., {n-1}`
    pub fn new(n: usize) -> Self {
        Self {
            sets: UnionFind::new(n),
            len: n,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Representative of the set containing `i`
    pub fn find(&mut self, i: usize) -> usize {
        self.sets.find_mut(i)
    }

    /// Merge the sets containing `i` and `j`
    ///
    /// Returns `false` if they already were in the same set.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        self.sets.union(i, j)
    }

    pub fn same_set(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }
}
