//! Brandes & Köpf horizontal coordinate assignment.
//!
//! Four alignments are computed by flipping the layering: `Up`/`Down` choose whether nodes align
//! with their predecessors (layers top to bottom) or successors (layers bottom to top), and
//! `Left`/`Right` choose the scan direction within a layer. Right-scanning variants are compacted
//! on the mirrored layering and negated afterwards. The variants are shifted onto the narrowest
//! one and every node takes the mean of its two median candidates.

use crate::error::{Error, Result};
use crate::graphlib::DisjointSet;
use crate::layered::{LayeredGraph, is_dummy, layer_matrix, width};
use rustc_hash::{FxHashMap, FxHashSet};

/// Unordered node pairs whose segment must not be used for alignment.
pub type Conflicts = FxHashSet<(usize, usize)>;

pub fn add_conflict(conflicts: &mut Conflicts, v: usize, w: usize) {
    conflicts.insert((v.min(w), v.max(w)));
}

pub fn has_conflict(conflicts: &Conflicts, v: usize, w: usize) -> bool {
    conflicts.contains(&(v.min(w), v.max(w)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Variant order; also the tie order when picking the narrowest alignment.
pub const VARIANTS: [(Vertical, Horizontal); 4] = [
    (Vertical::Up, Horizontal::Left),
    (Vertical::Up, Horizontal::Right),
    (Vertical::Down, Horizontal::Left),
    (Vertical::Down, Horizontal::Right),
];

/// Marks crossings between inner segments (dummy to dummy) and any other segment.
///
/// Only the non-inner segment of such a crossing is recorded, so alignment keeps long edges
/// straight and bends the short ones instead.
pub fn find_type1_conflicts(g: &LayeredGraph, layering: &[Vec<usize>]) -> Conflicts {
    let mut conflicts = Conflicts::default();

    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);
        let mut k0 = 0usize;
        let mut scan_pos = 0usize;
        let last = layer.last().copied();

        for (idx, &v) in layer.iter().enumerate() {
            let w = inner_segment_source(g, v);
            let k1 = w
                .and_then(|w| g.node(w))
                .map_or(prev_layer.len(), |n| n.order);

            if w.is_none() && last != Some(v) {
                continue;
            }
            for &scan_node in &layer[scan_pos..=idx] {
                let scan_dummy = is_dummy(g, scan_node);
                g.for_each_predecessor(scan_node, |u| {
                    let u_pos = g.node(u).map_or(0, |n| n.order);
                    if (u_pos < k0 || k1 < u_pos) && !(scan_dummy && is_dummy(g, u)) {
                        add_conflict(&mut conflicts, u, scan_node);
                    }
                });
            }
            scan_pos = idx + 1;
            k0 = k1;
        }
    }

    conflicts
}

fn inner_segment_source(g: &LayeredGraph, v: usize) -> Option<usize> {
    if !is_dummy(g, v) {
        return None;
    }
    g.predecessors(v).into_iter().find(|&u| is_dummy(g, u))
}

/// Blocks produced by one vertical alignment.
///
/// `root[v]` is the topmost member of the block containing `v` (in sweep order); `align[v]` is
/// the next member of the chain, wrapping from the last member back to the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub root: Vec<usize>,
    pub align: Vec<usize>,
}

pub fn vertical_alignment<F>(
    node_count: usize,
    layering: &[Vec<usize>],
    conflicts: &Conflicts,
    neighbors: F,
) -> Alignment
where
    F: Fn(usize) -> Vec<usize>,
{
    let mut blocks = DisjointSet::new(node_count);
    let mut align: Vec<usize> = (0..node_count).collect();
    let mut pos = vec![usize::MAX; node_count];
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            pos[v] = i;
        }
    }

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for &v in layer {
            let mut ws = neighbors(v);
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|&w| pos[w]);

            let lo = (ws.len() - 1) / 2;
            let hi = ws.len() / 2;
            for &w in &ws[lo..=hi] {
                let free = align[v] == v;
                if free
                    && prev_idx.is_none_or(|p| p < pos[w])
                    && !has_conflict(conflicts, v, w)
                {
                    align[w] = v;
                    blocks.attach(v, w);
                    align[v] = blocks.find(w);
                    prev_idx = Some(pos[w]);
                }
            }
        }
    }

    let root = (0..node_count).map(|v| blocks.find(v)).collect();
    Alignment { root, align }
}

/// Places every block as far left as its separation constraints allow.
///
/// Consecutive nodes of a layer from different blocks constrain their roots by
/// `(width[u] + width[v]) / 2 + nodesep`. Roots are placed in topological order of that
/// constraint graph using an explicit stack; a cycle yields [`Error::BlockCycle`].
pub fn horizontal_compaction(
    g: &LayeredGraph,
    layering: &[Vec<usize>],
    root: &[usize],
    nodesep: f64,
) -> Result<Vec<f64>> {
    let n = root.len();
    // preds[root] = (predecessor root, separation, layer of the constraint)
    let mut preds: Vec<Vec<(usize, f64, usize)>> = vec![Vec::new(); n];
    let mut slot: FxHashMap<(usize, usize), usize> = FxHashMap::default();
    let mut roots: Vec<usize> = Vec::new();
    let mut seen = vec![false; n];

    for layer in layering {
        let mut prev: Option<usize> = None;
        for &v in layer {
            let v_root = root[v];
            if !seen[v_root] {
                seen[v_root] = true;
                roots.push(v_root);
            }
            let Some(u) = prev.replace(v) else {
                continue;
            };
            let u_root = root[u];
            let layer_ix = g.node(v).map_or(0, |node| node.layer);
            if u_root == v_root {
                return Err(Error::BlockCycle { layer: layer_ix });
            }
            let sep = separation(g, u, v, nodesep);
            match slot.get(&(u_root, v_root)) {
                Some(&i) => {
                    let entry = &mut preds[v_root][i];
                    entry.1 = entry.1.max(sep);
                }
                None => {
                    slot.insert((u_root, v_root), preds[v_root].len());
                    preds[v_root].push((u_root, sep, layer_ix));
                }
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut xs = vec![0.0; n];
    let mut mark = vec![Mark::New; n];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for &start in &roots {
        if mark[start] != Mark::New {
            continue;
        }
        mark[start] = Mark::Active;
        stack.push((start, 0));

        while let Some(top) = stack.last_mut() {
            let (v, next) = *top;
            if let Some(&(u, _, layer)) = preds[v].get(next) {
                top.1 += 1;
                match mark[u] {
                    Mark::Done => {}
                    Mark::Active => return Err(Error::BlockCycle { layer }),
                    Mark::New => {
                        mark[u] = Mark::Active;
                        stack.push((u, 0));
                    }
                }
                continue;
            }
            stack.pop();
            xs[v] = preds[v]
                .iter()
                .map(|&(u, sep, _)| xs[u] + sep)
                .fold(0.0, f64::max);
            mark[v] = Mark::Done;
        }
    }

    Ok((0..n).map(|v| xs[root[v]]).collect())
}

/// Returns the variant with the smallest horizontal extent; earlier variants win ties.
pub fn find_smallest_width_alignment<'a>(g: &LayeredGraph, xss: &'a [Vec<f64>]) -> &'a [f64] {
    let mut best: &[f64] = &[];
    let mut best_width = f64::INFINITY;
    for xs in xss {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (v, &x) in xs.iter().enumerate() {
            let half = width(g, v) / 2.0;
            min = min.min(x - half);
            max = max.max(x + half);
        }
        let w = max - min;
        if w < best_width {
            best_width = w;
            best = xs;
        }
    }
    best
}

/// Shifts each variant onto `align_to`: left variants by their minimum, right ones by their
/// maximum.
pub fn align_coordinates(xss: &mut [Vec<f64>], align_to: &[f64]) {
    let (to_min, to_max) = extent(align_to);
    for (xs, (_, horiz)) in xss.iter_mut().zip(VARIANTS) {
        let (min, max) = extent(xs);
        let delta = match horiz {
            Horizontal::Left => to_min - min,
            Horizontal::Right => to_max - max,
        };
        if delta != 0.0 {
            xs.iter_mut().for_each(|x| *x += delta);
        }
    }
}

fn extent(xs: &[f64]) -> (f64, f64) {
    xs.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        })
}

/// Mean of the two median candidates per node.
pub fn balance(xss: &[Vec<f64>]) -> Vec<f64> {
    let n = xss.first().map_or(0, Vec::len);
    (0..n)
        .map(|v| {
            let mut vals: Vec<f64> = xss.iter().map(|xs| xs[v]).collect();
            vals.sort_by(|a, b| a.total_cmp(b));
            match vals.len() {
                0 => 0.0,
                len => (vals[(len - 1) / 2] + vals[len / 2]) / 2.0,
            }
        })
        .collect()
}

/// Pushes nodes right until neighbours in each layer are at least one separation apart.
pub fn enforce_separation(g: &LayeredGraph, layering: &[Vec<usize>], xs: &mut [f64], nodesep: f64) {
    for layer in layering {
        for pair in layer.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            let min_x = xs[u] + separation(g, u, v, nodesep);
            if xs[v] < min_x {
                xs[v] = min_x;
            }
        }
    }
}

/// Center-to-center distance required between layer neighbours `u` and `v`.
pub fn separation(g: &LayeredGraph, u: usize, v: usize, nodesep: f64) -> f64 {
    (width(g, u) + width(g, v)) / 2.0 + nodesep
}

/// Computes the center x of every node of the ordered proper graph `g`.
pub fn position_x(g: &LayeredGraph, nodesep: f64) -> Result<Vec<f64>> {
    let n = g.node_count();
    let layering = layer_matrix(g);
    let conflicts = find_type1_conflicts(g, &layering);

    let mut xss: Vec<Vec<f64>> = Vec::with_capacity(VARIANTS.len());
    for (vert, horiz) in VARIANTS {
        let mut adjusted: Vec<Vec<usize>> = match vert {
            Vertical::Up => layering.clone(),
            Vertical::Down => layering.iter().rev().cloned().collect(),
        };
        if horiz == Horizontal::Right {
            adjusted.iter_mut().for_each(|layer| layer.reverse());
        }

        let alignment = vertical_alignment(n, &adjusted, &conflicts, |v| match vert {
            Vertical::Up => g.predecessors(v),
            Vertical::Down => g.successors(v),
        });
        let mut xs = horizontal_compaction(g, &adjusted, &alignment.root, nodesep)?;
        if horiz == Horizontal::Right {
            xs.iter_mut().for_each(|x| *x = -*x);
        }
        xss.push(xs);
    }

    let smallest = find_smallest_width_alignment(g, &xss).to_vec();
    align_coordinates(&mut xss, &smallest);
    let mut xs = balance(&xss);
    enforce_separation(g, &layering, &mut xs, nodesep);
    tracing::debug!(nodes = n, conflicts = conflicts.len(), "brandes-köpf positioning");
    Ok(xs)
}
