//! Longest-path layering.
//!
//! Kahn's algorithm over the acyclic graph: every node starts at layer 0 and each edge pushes
//! its target to at least `layer[source] + 1`. Sources are released in index order.

use crate::error::{Error, Result};
use crate::layered::LayeredGraph;
use std::collections::VecDeque;

/// Assigns `layer` to every node and returns the number of layers.
pub fn longest_path(g: &mut LayeredGraph) -> Result<usize> {
    let n = g.node_count();
    let mut indegree: Vec<usize> = (0..n).map(|v| g.in_degree(v)).collect();
    let mut layer: Vec<usize> = vec![0; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();

    let mut visited = 0usize;
    while let Some(v) = queue.pop_front() {
        visited += 1;
        let next = layer[v] + 1;
        g.for_each_successor(v, |w| {
            layer[w] = layer[w].max(next);
            indegree[w] -= 1;
            if indegree[w] == 0 {
                queue.push_back(w);
            }
        });
    }

    if visited < n {
        return Err(Error::CycleDetected {
            remaining: n - visited,
        });
    }

    g.for_each_node_mut(|v, node| node.layer = layer[v]);
    let layers = layer.iter().max().map_or(0, |&l| l + 1);
    tracing::debug!(layers, "longest-path layering");
    Ok(layers)
}
