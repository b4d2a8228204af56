use strata::Error;
use strata::layered::{LayerEdge, LayerNode, LayeredGraph, NodeKind};
use strata::normalize;

fn node(g: &mut LayeredGraph, layer: usize) -> usize {
    let mut n = LayerNode::real(g.node_count(), 40.0, 20.0);
    n.layer = layer;
    g.add_node(n)
}

#[test]
fn run_leaves_unit_span_edges_alone() {
    let mut g = LayeredGraph::new();
    let a = node(&mut g, 0);
    let b = node(&mut g, 1);
    g.add_edge(a, b, LayerEdge::new(0));

    assert_eq!(normalize::run(&mut g), 0);
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.endpoints(0), Some((a, b)));
    assert!(!g.edge(0).unwrap().dummy);
    assert_eq!(normalize::verify(&g), Ok(()));
}

#[test]
fn run_splits_a_long_edge_into_a_dummy_chain() {
    let mut g = LayeredGraph::new();
    let a = node(&mut g, 0);
    let b = node(&mut g, 3);
    let mut label = LayerEdge::new(7);
    label.reversed = true;
    g.add_edge(a, b, label);

    assert_eq!(normalize::run(&mut g), 2);
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 3);
    assert_eq!(normalize::verify(&g), Ok(()));

    // The original slot becomes the first segment.
    assert_eq!(g.endpoints(0), Some((a, 2)));
    assert_eq!(g.endpoints(1), Some((2, 3)));
    assert_eq!(g.endpoints(2), Some((3, b)));

    for d in [2, 3] {
        let n = g.node(d).unwrap();
        assert_eq!(n.kind, NodeKind::Dummy { edge: 7 });
        assert_eq!((n.width, n.height), (1.0, 1.0));
        assert_eq!(n.layer, d - 1);
    }
    for (_, _, _, segment) in g.edges() {
        assert_eq!(segment.origin, 7);
        assert!(segment.dummy);
        assert!(segment.reversed);
    }
}

#[test]
fn verify_rejects_edges_that_skip_layers() {
    let mut g = LayeredGraph::new();
    let a = node(&mut g, 0);
    let b = node(&mut g, 2);
    g.add_edge(a, b, LayerEdge::new(4));

    assert_eq!(
        normalize::verify(&g),
        Err(Error::ImproperEdge { origin: 4, span: 2 })
    );
}

#[test]
fn verify_rejects_flat_edges() {
    let mut g = LayeredGraph::new();
    let a = node(&mut g, 1);
    let b = node(&mut g, 1);
    g.add_edge(a, b, LayerEdge::new(0));

    assert_eq!(
        normalize::verify(&g),
        Err(Error::ImproperEdge { origin: 0, span: 0 })
    );
}
