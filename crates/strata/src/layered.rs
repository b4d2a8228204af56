//! Internal layered graph.
//!
//! One `LayeredGraph` is built per connected component. Real nodes come first, in input order;
//! dummy nodes are appended by [`crate::normalize`]. All stages address nodes by their arena
//! index, so "original index" tie-breaking is simply index order.

use crate::graphlib::DiGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A caller node; `input` indexes `Graph::nodes`.
    Real { input: usize },
    /// Padding inserted on a long edge; `edge` indexes `Graph::edges`.
    Dummy { edge: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerNode {
    pub kind: NodeKind,
    pub width: f64,
    pub height: f64,
    pub layer: usize,
    pub order: usize,
    /// Canonical center x.
    pub x: f64,
    /// Canonical top y.
    pub y: f64,
}

impl LayerNode {
    pub fn real(input: usize, width: f64, height: f64) -> Self {
        Self {
            kind: NodeKind::Real { input },
            width,
            height,
            layer: 0,
            order: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn dummy(edge: usize, layer: usize) -> Self {
        Self {
            kind: NodeKind::Dummy { edge },
            width: 1.0,
            height: 1.0,
            layer,
            order: 0,
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self.kind, NodeKind::Dummy { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEdge {
    /// Index of the caller edge this segment belongs to.
    pub origin: usize,
    pub reversed: bool,
    pub dummy: bool,
}

impl LayerEdge {
    pub fn new(origin: usize) -> Self {
        Self {
            origin,
            reversed: false,
            dummy: false,
        }
    }
}

pub type LayeredGraph = DiGraph<LayerNode, LayerEdge>;

pub fn is_dummy(g: &LayeredGraph, v: usize) -> bool {
    g.node(v).is_some_and(LayerNode::is_dummy)
}

pub fn width(g: &LayeredGraph, v: usize) -> f64 {
    g.node(v).map(|n| n.width).unwrap_or(0.0)
}

pub fn layer_count(g: &LayeredGraph) -> usize {
    g.nodes().map(|(_, n)| n.layer + 1).max().unwrap_or(0)
}

/// Nodes grouped by layer and sorted by `order` (index order on ties).
pub fn layer_matrix(g: &LayeredGraph) -> Vec<Vec<usize>> {
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count(g)];
    for (v, n) in g.nodes() {
        layers[n.layer].push(v);
    }
    for layer in &mut layers {
        layer.sort_by_key(|&v| g.node(v).map(|n| n.order).unwrap_or(usize::MAX));
    }
    layers
}

/// Writes each node's position within its layer back to `order`.
pub fn assign_order(g: &mut LayeredGraph, layering: &[Vec<usize>]) {
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            if let Some(n) = g.node_mut(v) {
                n.order = i;
            }
        }
    }
}
