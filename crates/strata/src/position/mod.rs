//! Coordinate assignment for an ordered proper graph.
//!
//! Layers are stacked top to bottom by their tallest member; x comes from [`bk::position_x`].

use crate::error::Result;
use crate::layered::{LayeredGraph, layer_matrix};

pub mod bk;

pub fn position(g: &mut LayeredGraph, nodesep: f64, ranksep: f64) -> Result<()> {
    let layering = layer_matrix(g);
    place_layers(g, &layering, ranksep);

    let xs = bk::position_x(g, nodesep)?;
    g.for_each_node_mut(|v, n| n.x = xs[v]);
    Ok(())
}

/// Sets each node's top y. A layer band is as tall as its tallest node, bands are `ranksep`
/// apart, and nodes are centered vertically within their band.
pub fn place_layers(g: &mut LayeredGraph, layering: &[Vec<usize>], ranksep: f64) {
    let mut top = 0.0;
    for layer in layering {
        let band = layer
            .iter()
            .filter_map(|&v| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        for &v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = top + (band - n.height) / 2.0;
            }
        }
        top += band + ranksep;
    }
}
