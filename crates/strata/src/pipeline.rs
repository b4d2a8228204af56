//! The layered layout pipeline.
//!
//! Per connected component: cycle breaking, longest-path ranking, normalization, barycenter
//! ordering and coordinate assignment. Components are then packed, mapped into the requested
//! rank direction and offset by the margins.

use crate::components::{self, Link, Placed};
use crate::coordinate_system;
use crate::error::{Error, Result};
use crate::layered::{LayerEdge, LayerNode, LayeredGraph};
use crate::model::{BendpointClear, Bounds, Diagnostics, Graph, LayoutResult, Node, NodeDelta};
use crate::options::{LayoutOptions, node_size_or_default};
use crate::{acyclic, normalize, order, position, rank};
use rustc_hash::FxHashMap;

pub fn run<N, E>(graph: &Graph<N, E>, options: &LayoutOptions) -> Result<LayoutResult<N, E>>
where
    N: Clone,
    E: Clone,
{
    let opts = options.sanitized();
    let index = index_nodes(&graph.nodes)?;
    let links = resolve_links(graph, &index);
    let n = graph.nodes.len();

    let mut sizes: Vec<(f64, f64)> = graph.nodes.iter().map(node_size).collect();
    coordinate_system::adjust(&mut sizes, opts.rankdir);

    let mut diagnostics = Diagnostics::default();
    let mut boxes: Vec<Bounds> = if n <= 1 {
        diagnostics.layers = n;
        diagnostics.components = n;
        sizes
            .iter()
            .map(|&(w, h)| Bounds::new(0.0, 0.0, w, h))
            .collect()
    } else {
        let groups = components::split(n, &links);
        let mut component_of = vec![0usize; n];
        for (c, members) in groups.iter().enumerate() {
            for &v in members {
                component_of[v] = c;
            }
        }
        let mut grouped_links: Vec<Vec<Link>> = vec![Vec::new(); groups.len()];
        for &link in &links {
            grouped_links[component_of[link.source]].push(link);
        }

        let mut placed: Vec<Placed> = Vec::with_capacity(groups.len());
        let mut downward = 0usize;
        for (members, links) in groups.into_iter().zip(&grouped_links) {
            let (component, stats) = layout_component(members, &sizes, links, &opts)?;
            diagnostics.reversed_edges += stats.reversed_edges;
            diagnostics.layers = diagnostics.layers.max(stats.layers);
            diagnostics.crossings += stats.crossings;
            downward += stats.downward_edges;
            placed.push(component);
        }
        diagnostics.components = placed.len();
        if !links.is_empty() {
            diagnostics.downward_edge_percentage = downward as f64 * 100.0 / links.len() as f64;
        }
        components::pack(&placed, n, opts.component_gap())
    };

    coordinate_system::undo(&mut boxes, opts.rankdir);
    coordinate_system::apply_margins(&mut boxes, opts.marginx, opts.marginy);

    let nodes = graph
        .nodes
        .iter()
        .zip(boxes)
        .map(|(node, new_bounds)| {
            if !(new_bounds.x.is_finite() && new_bounds.y.is_finite()) {
                return Err(Error::NonFiniteCoordinate {
                    id: node.id.clone(),
                });
            }
            Ok(NodeDelta {
                id: node.id.clone(),
                handle: node.handle.clone(),
                old_bounds: node.bounds(),
                new_bounds,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        nodes = nodes.len(),
        components = diagnostics.components,
        layers = diagnostics.layers,
        reversed = diagnostics.reversed_edges,
        "layered layout done"
    );

    Ok(LayoutResult {
        nodes,
        bendpoints: bendpoint_clears(graph, |id| index.contains_key(id)),
        diagnostics,
    })
}

#[derive(Debug, Default)]
struct ComponentStats {
    reversed_edges: usize,
    layers: usize,
    downward_edges: usize,
    crossings: usize,
}

fn layout_component(
    members: Vec<usize>,
    sizes: &[(f64, f64)],
    links: &[Link],
    opts: &LayoutOptions,
) -> Result<(Placed, ComponentStats)> {
    if let &[v] = members.as_slice() {
        let (w, h) = sizes[v];
        let stats = ComponentStats {
            layers: 1,
            ..ComponentStats::default()
        };
        return Ok((Placed::new(members, vec![Bounds::new(0.0, 0.0, w, h)]), stats));
    }

    let mut g = LayeredGraph::with_capacity(members.len(), links.len());
    let mut local: FxHashMap<usize, usize> = FxHashMap::default();
    for &v in &members {
        let (w, h) = sizes[v];
        local.insert(v, g.add_node(LayerNode::real(v, w, h)));
    }
    for link in links {
        if let (Some(&s), Some(&t)) = (local.get(&link.source), local.get(&link.target)) {
            g.add_edge(s, t, LayerEdge::new(link.edge));
        }
    }

    let reversed_edges = acyclic::run(&mut g);
    let layers = rank::longest_path(&mut g)?;
    let downward_edges = g
        .edges()
        .filter(|&(_, v, w, label)| {
            let (source, target) = if label.reversed { (w, v) } else { (v, w) };
            layer_of(&g, target) > layer_of(&g, source)
        })
        .count();

    normalize::run(&mut g);
    normalize::verify(&g)?;
    let crossings = order::order(&mut g, opts.iterations);
    position::position(&mut g, opts.nodesep, opts.ranksep)?;

    // Real nodes occupy the first `members.len()` slots, in member order.
    let boxes = (0..members.len())
        .filter_map(|v| g.node(v))
        .map(|n| Bounds::new(n.x - n.width / 2.0, n.y, n.width, n.height))
        .collect();

    let stats = ComponentStats {
        reversed_edges,
        layers,
        downward_edges,
        crossings,
    };
    Ok((Placed::new(members, boxes), stats))
}

fn layer_of(g: &LayeredGraph, v: usize) -> usize {
    g.node(v).map_or(0, |n| n.layer)
}

fn index_nodes<N>(nodes: &[Node<N>]) -> Result<FxHashMap<&str, usize>> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    for (i, node) in nodes.iter().enumerate() {
        if index.insert(node.id.as_str(), i).is_some() {
            return Err(Error::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }
    Ok(index)
}

fn node_size<N>(node: &Node<N>) -> (f64, f64) {
    let size = node_size_or_default(node.width, node.height);
    if size != (node.width, node.height) {
        tracing::warn!(
            id = %node.id,
            width = node.width,
            height = node.height,
            "invalid node size; using default"
        );
    }
    size
}

/// Layout participants among the input edges: self-loops and edges with unknown endpoints are
/// left out.
fn resolve_links<N, E>(graph: &Graph<N, E>, index: &FxHashMap<&str, usize>) -> Vec<Link> {
    let mut links = Vec::with_capacity(graph.edges.len());
    for (edge, e) in graph.edges.iter().enumerate() {
        let (Some(&source), Some(&target)) =
            (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            tracing::warn!(
                id = %e.id,
                source = %e.source,
                target = %e.target,
                "skipping edge with unknown endpoint"
            );
            continue;
        };
        if source != target {
            links.push(Link {
                edge,
                source,
                target,
            });
        }
    }
    links
}

/// Edges between known nodes that currently carry bend points.
pub(crate) fn bendpoint_clears<N, E, F>(graph: &Graph<N, E>, known: F) -> Vec<BendpointClear<E>>
where
    E: Clone,
    F: Fn(&str) -> bool,
{
    graph
        .edges
        .iter()
        .filter(|e| !e.bendpoints.is_empty() && known(&e.source) && known(&e.target))
        .map(|e| BendpointClear {
            id: e.id.clone(),
            handle: e.handle.clone(),
            old_bendpoints: e.bendpoints.clone(),
        })
        .collect()
}
