//! Symmetric multi-relation over node indices.
//!
//! Each undirected link is stored as two directed entries, one in each
//! endpoint's adjacency list. Lists keep insertion order and may repeat a
//! target when parallel links exist.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LinkTable {
    adjacency: Vec<Vec<usize>>,
}

impl LinkTable {
    pub(crate) fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Inserts `origin → target` and `target → origin`.
    ///
    /// Callers validate both endpoints against the node count first.
    pub(crate) fn insert(&mut self, origin: usize, target: usize) {
        debug_assert!(origin != target, "self-links must be rejected upstream");
        if let Some(list) = self.adjacency.get_mut(origin) {
            list.push(target);
        }
        if let Some(list) = self.adjacency.get_mut(target) {
            list.push(origin);
        }
    }

    /// Pushes a single directed entry without its reverse, bypassing the
    /// symmetry guarantee.
    #[cfg(test)]
    pub(crate) fn push_directed(&mut self, origin: usize, target: usize) {
        if let Some(list) = self.adjacency.get_mut(origin) {
            list.push(target);
        }
    }

    pub(crate) fn degree(&self, node: usize) -> Option<usize> {
        self.adjacency.get(node).map(Vec::len)
    }

    pub(crate) fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of directed entries.
    pub(crate) fn entry_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Enumerates directed entries in source order, then insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(origin, targets)| targets.iter().map(move |&target| (origin, target)))
    }

    /// Removes every entry while keeping the node count.
    pub(crate) fn clear(&mut self) {
        for list in &mut self.adjacency {
            list.clear();
        }
    }

    /// Adjusts the table to `node_count` nodes and returns how many directed
    /// entries were purged.
    ///
    /// Lists of removed nodes are dropped whole; surviving lists are filtered
    /// in place so that no entry names a removed node. Both directions of a
    /// purged link therefore disappear together.
    pub(crate) fn set_node_count(&mut self, node_count: usize) -> usize {
        if node_count >= self.adjacency.len() {
            self.adjacency.resize_with(node_count, Vec::new);
            return 0;
        }
        let mut purged: usize = self
            .adjacency
            .iter()
            .skip(node_count)
            .map(Vec::len)
            .sum();
        self.adjacency.truncate(node_count);
        for list in &mut self.adjacency {
            let before = list.len();
            list.retain(|&target| target < node_count);
            purged += before - list.len();
        }
        purged
    }
}
