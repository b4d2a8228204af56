//! Directed multigraph container.
//!
//! Node and edge labels are stored in insertion order. Every traversal API (`successors`,
//! `in_edges`, ...) reports neighbours in edge insertion order, which keeps the layout stages
//! built on top of it deterministic.

mod adj_cache;
mod entries;

use adj_cache::DirectedAdjCache;
use entries::EdgeEntry;
use std::cell::{Ref, RefCell};

#[derive(Debug, Clone)]
pub struct DiGraph<N, E> {
    nodes: Vec<N>,
    edges: Vec<EdgeEntry<E>>,

    // Bumped on every structural mutation; the cache is rebuilt lazily on the next query.
    adj_gen: u64,
    adj_cache: RefCell<DirectedAdjCache>,
}

impl<N, E> Default for DiGraph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> DiGraph<N, E> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            adj_gen: 0,
            adj_cache: RefCell::new(DirectedAdjCache::stale()),
        }
    }

    fn invalidate_adj(&mut self) {
        self.adj_gen = self.adj_gen.wrapping_add(1);
    }

    fn adj(&self) -> Ref<'_, DirectedAdjCache> {
        let stale = self.adj_cache.borrow().generation != self.adj_gen;
        if stale {
            *self.adj_cache.borrow_mut() =
                DirectedAdjCache::build(self.adj_gen, self.nodes.len(), &self.edges);
        }
        self.adj_cache.borrow()
    }

    pub fn add_node(&mut self, label: N) -> usize {
        self.invalidate_adj();
        self.nodes.push(label);
        self.nodes.len() - 1
    }

    /// Adds an edge `v -> w` and returns its index.
    ///
    /// Panics if either endpoint is not a node of this graph.
    pub fn add_edge(&mut self, v: usize, w: usize, label: E) -> usize {
        assert!(
            v < self.nodes.len() && w < self.nodes.len(),
            "edge endpoint out of range: {v} -> {w} (node count {})",
            self.nodes.len()
        );
        self.invalidate_adj();
        self.edges.push(EdgeEntry { v, w, label });
        self.edges.len() - 1
    }

    /// Redirects edge `e` to `v -> w`, keeping its index and label.
    ///
    /// Panics if either endpoint is not a node of this graph.
    pub fn set_endpoints(&mut self, e: usize, v: usize, w: usize) -> bool {
        assert!(
            v < self.nodes.len() && w < self.nodes.len(),
            "edge endpoint out of range: {v} -> {w} (node count {})",
            self.nodes.len()
        );
        let Some(entry) = self.edges.get_mut(e) else {
            return false;
        };
        entry.v = v;
        entry.w = w;
        self.invalidate_adj();
        true
    }

    /// Swaps the endpoints of edge `e`.
    pub fn reverse_edge(&mut self, e: usize) -> bool {
        let Some(entry) = self.edges.get_mut(e) else {
            return false;
        };
        (entry.v, entry.w) = (entry.w, entry.v);
        self.invalidate_adj();
        true
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, v: usize) -> Option<&N> {
        self.nodes.get(v)
    }

    pub fn node_mut(&mut self, v: usize) -> Option<&mut N> {
        self.nodes.get_mut(v)
    }

    pub fn edge(&self, e: usize) -> Option<&E> {
        self.edges.get(e).map(|entry| &entry.label)
    }

    pub fn edge_mut(&mut self, e: usize) -> Option<&mut E> {
        self.edges.get_mut(e).map(|entry| &mut entry.label)
    }

    pub fn endpoints(&self, e: usize) -> Option<(usize, usize)> {
        self.edges.get(e).map(|entry| (entry.v, entry.w))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (usize, &N)> {
        self.nodes.iter().enumerate()
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut N),
    {
        for (v, label) in self.nodes.iter_mut().enumerate() {
            f(v, label);
        }
    }

    /// Iterates `(edge, v, w, label)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, usize, &E)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(e, entry)| (e, entry.v, entry.w, &entry.label))
    }

    pub fn successors(&self, v: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.for_each_successor(v, |w| out.push(w));
        out
    }

    pub fn predecessors(&self, v: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.for_each_predecessor(v, |u| out.push(u));
        out
    }

    pub fn for_each_successor<F>(&self, v: usize, mut f: F)
    where
        F: FnMut(usize),
    {
        if v >= self.nodes.len() {
            return;
        }
        let cache = self.adj();
        for &e in cache.out_edges(v) {
            f(self.edges[e].w);
        }
    }

    pub fn for_each_predecessor<F>(&self, v: usize, mut f: F)
    where
        F: FnMut(usize),
    {
        if v >= self.nodes.len() {
            return;
        }
        let cache = self.adj();
        for &e in cache.in_edges(v) {
            f(self.edges[e].v);
        }
    }

    pub fn out_edges(&self, v: usize) -> Vec<usize> {
        if v >= self.nodes.len() {
            return Vec::new();
        }
        self.adj().out_edges(v).to_vec()
    }

    pub fn in_edges(&self, v: usize) -> Vec<usize> {
        if v >= self.nodes.len() {
            return Vec::new();
        }
        self.adj().in_edges(v).to_vec()
    }

    pub fn out_degree(&self, v: usize) -> usize {
        if v >= self.nodes.len() {
            return 0;
        }
        self.adj().out_edges(v).len()
    }

    pub fn in_degree(&self, v: usize) -> usize {
        if v >= self.nodes.len() {
            return 0;
        }
        self.adj().in_edges(v).len()
    }

    /// Nodes without incoming edges, in index order.
    pub fn sources(&self) -> Vec<usize> {
        let cache = self.adj();
        (0..self.nodes.len())
            .filter(|&v| cache.in_edges(v).is_empty())
            .collect()
    }

    /// Nodes without outgoing edges, in index order.
    pub fn sinks(&self) -> Vec<usize> {
        let cache = self.adj();
        (0..self.nodes.len())
            .filter(|&v| cache.out_edges(v).is_empty())
            .collect()
    }
}
