//! Adjacency cache used by [`DiGraph`](super::DiGraph).
//!
//! Layering, ordering and positioning query successors / predecessors repeatedly; scanning all
//! edges each time is O(E) per query. The cache stores edge indices in CSR form, grouped by
//! endpoint and kept in edge insertion order.

use super::entries::EdgeEntry;

#[derive(Debug, Clone)]
pub(in crate::graph) struct DirectedAdjCache {
    pub(in crate::graph) generation: u64,
    out_offsets: Vec<usize>,
    out_edges: Vec<usize>,
    in_offsets: Vec<usize>,
    in_edges: Vec<usize>,
}

impl DirectedAdjCache {
    pub(in crate::graph) fn stale() -> Self {
        Self {
            generation: u64::MAX,
            out_offsets: Vec::new(),
            out_edges: Vec::new(),
            in_offsets: Vec::new(),
            in_edges: Vec::new(),
        }
    }

    pub(in crate::graph) fn build<E>(
        generation: u64,
        node_count: usize,
        edges: &[EdgeEntry<E>],
    ) -> Self {
        let mut out_offsets = vec![0usize; node_count + 1];
        let mut in_offsets = vec![0usize; node_count + 1];
        for e in edges {
            out_offsets[e.v + 1] += 1;
            in_offsets[e.w + 1] += 1;
        }
        for i in 0..node_count {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_fill = out_offsets.clone();
        let mut in_fill = in_offsets.clone();
        let mut out_edges = vec![0usize; edges.len()];
        let mut in_edges = vec![0usize; edges.len()];
        for (edge_ix, e) in edges.iter().enumerate() {
            out_edges[out_fill[e.v]] = edge_ix;
            out_fill[e.v] += 1;
            in_edges[in_fill[e.w]] = edge_ix;
            in_fill[e.w] += 1;
        }

        Self {
            generation,
            out_offsets,
            out_edges,
            in_offsets,
            in_edges,
        }
    }

    pub(in crate::graph) fn out_edges(&self, v: usize) -> &[usize] {
        let start = self.out_offsets[v];
        let end = self.out_offsets[v + 1];
        &self.out_edges[start..end]
    }

    pub(in crate::graph) fn in_edges(&self, v: usize) -> &[usize] {
        let start = self.in_offsets[v];
        let end = self.in_offsets[v + 1];
        &self.in_edges[start..end]
    }
}
