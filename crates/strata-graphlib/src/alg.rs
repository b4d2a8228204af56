//! Helper algorithms over [`DiGraph`].

use crate::{DiGraph, DisjointSet};
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

/// Weakly connected components.
///
/// Components are listed in order of their smallest node index; members are in index order.
pub fn components<N, E>(g: &DiGraph<N, E>) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(g.node_count());
    for (_, v, w, _) in g.edges() {
        sets.union(v, w);
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::default();
    let mut out: Vec<Vec<usize>> = Vec::new();
    for v in 0..g.node_count() {
        let root = sets.find(v);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            out.push(Vec::new());
            out.len() - 1
        });
        out[slot].push(v);
    }
    out
}

/// Kahn topological order, or `None` when the graph has a cycle.
///
/// Sources are released in index order, so the result is deterministic.
pub fn topsort<N, E>(g: &DiGraph<N, E>) -> Option<Vec<usize>> {
    let mut indegree: Vec<usize> = (0..g.node_count()).map(|v| g.in_degree(v)).collect();
    let mut queue: VecDeque<usize> = (0..g.node_count())
        .filter(|&v| indegree[v] == 0)
        .collect();

    let mut out: Vec<usize> = Vec::with_capacity(g.node_count());
    while let Some(v) = queue.pop_front() {
        out.push(v);
        g.for_each_successor(v, |w| {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push_back(w);
            }
        });
    }

    (out.len() == g.node_count()).then_some(out)
}

pub fn is_acyclic<N, E>(g: &DiGraph<N, E>) -> bool {
    topsort(g).is_some()
}

/// Strongly connected components that form cycles (size > 1, or a self-loop).
///
/// Each cycle lists its members in index order; cycles are sorted by first member.
pub fn find_cycles<N, E>(g: &DiGraph<N, E>) -> Vec<Vec<usize>> {
    struct Tarjan<'a, N, E> {
        g: &'a DiGraph<N, E>,
        index: usize,
        stack: Vec<usize>,
        on_stack: Vec<bool>,
        indices: Vec<Option<usize>>,
        lowlink: Vec<usize>,
        sccs: Vec<Vec<usize>>,
    }

    impl<N, E> Tarjan<'_, N, E> {
        fn strongconnect(&mut self, v: usize) {
            self.indices[v] = Some(self.index);
            self.lowlink[v] = self.index;
            self.index += 1;
            self.stack.push(v);
            self.on_stack[v] = true;

            for w in self.g.successors(v) {
                match self.indices[w] {
                    None => {
                        self.strongconnect(w);
                        self.lowlink[v] = self.lowlink[v].min(self.lowlink[w]);
                    }
                    Some(w_idx) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_idx);
                    }
                    Some(_) => {}
                }
            }

            if Some(self.lowlink[v]) == self.indices[v] {
                let mut scc: Vec<usize> = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                self.sccs.push(scc);
            }
        }
    }

    let n = g.node_count();
    let mut tarjan = Tarjan {
        g,
        index: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        indices: vec![None; n],
        lowlink: vec![0; n],
        sccs: Vec::new(),
    };
    for v in 0..n {
        if tarjan.indices[v].is_none() {
            tarjan.strongconnect(v);
        }
    }

    let mut cycles: Vec<Vec<usize>> = Vec::new();
    for mut scc in tarjan.sccs {
        if scc.len() > 1 {
            scc.sort_unstable();
            cycles.push(scc);
        } else if g.successors(scc[0]).contains(&scc[0]) {
            cycles.push(scc);
        }
    }
    cycles.sort_by_key(|c| c[0]);
    cycles
}
