//! Connected components and partition numbering
//!
//! Components are found with union-find over the undirected view of a
//! graph's edges. A partition numbers groups component-by-component,
//! largest first, which keeps group ids stable across runs.

use std::collections::HashMap;
use std::hash::Hash;

/// Union-Find with path compression and union by rank
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]);
        }
        self.parent[i]
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Connected components over an undirected view of the edges.
///
/// Components come back sorted by size descending (ties by smallest
/// member), members sorted ascending, so the decomposition is
/// deterministic regardless of input order.
pub fn connected_components<K>(nodes: &[K], edges: impl Iterator<Item = (K, K)>) -> Vec<Vec<K>>
where
    K: Copy + Eq + Hash + Ord,
{
    let mut index: HashMap<K, usize> = HashMap::with_capacity(nodes.len());
    for (i, &n) in nodes.iter().enumerate() {
        index.insert(n, i);
    }

    let mut uf = UnionFind::new(nodes.len());
    for (u, v) in edges {
        if let (Some(&ui), Some(&vi)) = (index.get(&u), index.get(&v)) {
            uf.union(ui, vi);
        }
    }

    let mut by_root: HashMap<usize, Vec<K>> = HashMap::new();
    for (i, &n) in nodes.iter().enumerate() {
        by_root.entry(uf.find(i)).or_default().push(n);
    }

    let mut components: Vec<Vec<K>> = by_root.into_values().collect();
    for comp in &mut components {
        comp.sort_unstable();
    }
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));
    components
}

/// A numbered grouping of nodes
pub struct Partition<K> {
    groups: HashMap<K, usize>,
    group_count: usize,
}

impl<K: Copy + Eq + Hash + Ord> Partition<K> {
    /// One group per connected component, ids assigned in component
    /// order with a running offset.
    pub fn from_components(components: &[Vec<K>]) -> Self {
        let mut groups = HashMap::new();
        for (group, comp) in components.iter().enumerate() {
            for &node in comp {
                groups.insert(node, group);
            }
        }
        Self {
            groups,
            group_count: components.len(),
        }
    }

    pub fn group_of(&self, node: K) -> Option<usize> {
        self.groups.get(&node).copied()
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group sizes indexed by group id
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.group_count];
        for &group in self.groups.values() {
            sizes[group] += 1;
        }
        sizes
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.groups.iter().map(|(&n, &g)| (n, g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_split_disconnected_graph() {
        let nodes = vec![1i64, 2, 3, 4, 5];
        let edges = vec![(1, 2), (2, 3), (4, 5)];
        let components = connected_components(&nodes, edges.into_iter());

        assert_eq!(components.len(), 2);
        assert_eq!(components[0], vec![1, 2, 3]);
        assert_eq!(components[1], vec![4, 5]);
    }

    #[test]
    fn test_singleton_components() {
        let nodes = vec![10i64, 20, 30];
        let components = connected_components(&nodes, std::iter::empty());

        assert_eq!(components.len(), 3);
        // size ties broken by smallest member
        assert_eq!(components, vec![vec![10], vec![20], vec![30]]);
    }

    #[test]
    fn test_direction_is_ignored() {
        let nodes = vec![1i64, 2, 3];
        // edges all point "backwards"
        let edges = vec![(3, 2), (2, 1)];
        let components = connected_components(&nodes, edges.into_iter());
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn test_partition_numbers_largest_first() {
        let nodes = vec![1i64, 2, 3, 4, 5];
        let edges = vec![(4, 5), (1, 2), (2, 3)];
        let components = connected_components(&nodes, edges.into_iter());
        let partition = Partition::from_components(&components);

        assert_eq!(partition.group_count(), 2);
        assert_eq!(partition.group_of(1), Some(0));
        assert_eq!(partition.group_of(3), Some(0));
        assert_eq!(partition.group_of(5), Some(1));
        assert_eq!(partition.group_sizes(), vec![3, 2]);
    }
}
