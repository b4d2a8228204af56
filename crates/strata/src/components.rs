//! Connected components and left-to-right packing.

use crate::graphlib::DisjointSet;
use crate::model::Bounds;

/// An input edge that takes part in layout, with resolved endpoint indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub edge: usize,
    pub source: usize,
    pub target: usize,
}

/// Weakly connected components of `node_count` nodes joined by `links`.
///
/// Members are listed in ascending index order and components are ordered by their first member.
pub fn split(node_count: usize, links: &[Link]) -> Vec<Vec<usize>> {
    let mut sets = DisjointSet::new(node_count);
    for link in links {
        sets.union(link.source, link.target);
    }

    let mut slot: Vec<Option<usize>> = vec![None; node_count];
    let mut out: Vec<Vec<usize>> = Vec::new();
    for v in 0..node_count {
        let root = sets.find(v);
        match slot[root] {
            Some(i) => out[i].push(v),
            None => {
                slot[root] = Some(out.len());
                out.push(vec![v]);
            }
        }
    }
    out
}

/// A laid out component in top-down space, translated so its bounding box starts at (0, 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    /// Input node indices, parallel to `boxes`.
    pub members: Vec<usize>,
    pub boxes: Vec<Bounds>,
    pub width: f64,
    pub height: f64,
}

impl Placed {
    pub fn new(members: Vec<usize>, mut boxes: Vec<Bounds>) -> Self {
        let Some(bbox) = boxes.iter().copied().reduce(|acc, b| acc.union(&b)) else {
            return Self {
                members,
                boxes,
                width: 0.0,
                height: 0.0,
            };
        };
        for b in &mut boxes {
            b.x -= bbox.x;
            b.y -= bbox.y;
        }
        Self {
            members,
            boxes,
            width: bbox.width,
            height: bbox.height,
        }
    }
}

/// Packs components left to right, largest first, `gap` apart and top-aligned.
///
/// Returns one box per input node, indexed like the input.
pub fn pack(components: &[Placed], node_count: usize, gap: f64) -> Vec<Bounds> {
    let mut sorted: Vec<&Placed> = components.iter().collect();
    sorted.sort_by(|a, b| b.members.len().cmp(&a.members.len()));

    let mut out = vec![Bounds::default(); node_count];
    let mut cursor = 0.0;
    for component in sorted {
        for (&v, b) in component.members.iter().zip(&component.boxes) {
            out[v] = Bounds { x: b.x + cursor, ..*b };
        }
        cursor += component.width + gap;
    }
    out
}
