//! Crossing minimization by barycenter sweeps.
//!
//! Each iteration runs a top-down sweep (predecessors in the layer above are fixed) followed by a
//! bottom-up sweep (successors in the layer below are fixed). A node's barycenter is the mean
//! `order` of its neighbours in the fixed layer; nodes without such neighbours use their current
//! index. Layers are re-sorted stably by `(barycenter, current index)`.

use crate::layered::{LayeredGraph, assign_order, layer_matrix};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Down,
    Up,
}

/// Orders every layer of the proper graph `g` and returns the remaining crossing count.
pub fn order(g: &mut LayeredGraph, iterations: usize) -> usize {
    let mut layering = layer_matrix(g);
    assign_order(g, &layering);

    for _ in 0..iterations {
        for i in 1..layering.len() {
            sort_layer(g, &mut layering, i, Sweep::Down);
        }
        for i in (0..layering.len().saturating_sub(1)).rev() {
            sort_layer(g, &mut layering, i, Sweep::Up);
        }
    }

    let crossings = cross_count(g, &layering);
    tracing::debug!(iterations, crossings, "barycenter ordering");
    crossings
}

fn sort_layer(g: &mut LayeredGraph, layering: &mut [Vec<usize>], i: usize, sweep: Sweep) {
    let mut entries: Vec<(f64, usize, usize)> = layering[i]
        .iter()
        .enumerate()
        .map(|(idx, &v)| (barycenter(g, v, sweep).unwrap_or(idx as f64), idx, v))
        .collect();
    entries.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });

    layering[i] = entries.into_iter().map(|(_, _, v)| v).collect();
    for (idx, &v) in layering[i].iter().enumerate() {
        if let Some(n) = g.node_mut(v) {
            n.order = idx;
        }
    }
}

fn barycenter(g: &LayeredGraph, v: usize, sweep: Sweep) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut visit = |u: usize| {
        if let Some(n) = g.node(u) {
            sum += n.order as f64;
            count += 1;
        }
    };
    match sweep {
        Sweep::Down => g.for_each_predecessor(v, &mut visit),
        Sweep::Up => g.for_each_successor(v, &mut visit),
    }
    (count > 0).then(|| sum / count as f64)
}

/// Counts edge crossings between every pair of adjacent layers.
///
/// Uses the accumulator tree of Barth, Jünger and Mutzel, so each layer pair costs
/// `O(E log V)`.
pub fn cross_count(g: &LayeredGraph, layering: &[Vec<usize>]) -> usize {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

fn two_layer_cross_count(g: &LayeredGraph, north: &[usize], south: &[usize]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos = vec![usize::MAX; g.node_count()];
    for (i, &v) in south.iter().enumerate() {
        south_pos[v] = i;
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = g
            .successors(v)
            .into_iter()
            .map(|w| south_pos[w])
            .filter(|&pos| pos != usize::MAX)
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index = 1usize;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let mut tree = vec![0usize; 2 * first_index - 1];
    first_index -= 1;

    let mut cc = 0usize;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum = 0usize;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }
    cc
}
