//! Normalize long edges by inserting dummy nodes.
//!
//! An edge spanning `k > 1` layers becomes a chain of `k` unit-span segments through `k - 1`
//! dummy nodes (1×1, one per intermediate layer). Every segment keeps the caller edge in
//! `origin`. The original edge slot is reused as the first segment so edge indices stay stable.

use crate::error::{Error, Result};
use crate::layered::{LayerEdge, LayerNode, LayeredGraph};

/// Splits every long edge and returns the number of dummy nodes created.
pub fn run(g: &mut LayeredGraph) -> usize {
    let mut dummies = 0usize;
    let edge_count = g.edge_count();
    for e in 0..edge_count {
        dummies += normalize_edge(g, e);
    }
    tracing::debug!(dummies, "normalized long edges");
    dummies
}

fn normalize_edge(g: &mut LayeredGraph, e: usize) -> usize {
    let Some((v, w)) = g.endpoints(e) else {
        return 0;
    };
    let Some(&label) = g.edge(e) else {
        return 0;
    };
    let v_layer = g.node(v).map_or(0, |n| n.layer);
    let w_layer = g.node(w).map_or(0, |n| n.layer);
    if w_layer <= v_layer + 1 {
        return 0;
    }

    let segment = LayerEdge {
        dummy: true,
        ..label
    };
    if let Some(first) = g.edge_mut(e) {
        first.dummy = true;
    }

    let mut prev = v;
    for layer in v_layer + 1..w_layer {
        let d = g.add_node(LayerNode::dummy(label.origin, layer));
        if prev == v {
            g.set_endpoints(e, v, d);
        } else {
            g.add_edge(prev, d, segment);
        }
        prev = d;
    }
    g.add_edge(prev, w, segment);

    w_layer - v_layer - 1
}

/// Checks that every edge spans exactly one layer.
pub fn verify(g: &LayeredGraph) -> Result<()> {
    for (_, v, w, label) in g.edges() {
        let v_layer = g.node(v).map_or(0, |n| n.layer) as i64;
        let w_layer = g.node(w).map_or(0, |n| n.layer) as i64;
        let span = w_layer - v_layer;
        if span != 1 {
            return Err(Error::ImproperEdge {
                origin: label.origin,
                span,
            });
        }
    }
    Ok(())
}
