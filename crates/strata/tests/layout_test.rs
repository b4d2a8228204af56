use strata::{
    Bounds, Edge, Error, Graph, LayoutOptions, LayoutResult, Node, Point, RankDir, layout,
};

type G = Graph<(), ()>;

fn graph(nodes: &[(&str, f64, f64)], edges: &[(&str, &str)]) -> G {
    let mut g = G::new();
    for &(id, w, h) in nodes {
        g.add_node(Node::new(id, w, h, ()));
    }
    for (i, &(v, w)) in edges.iter().enumerate() {
        g.add_edge(Edge::new(format!("e{i}"), v, w, ()));
    }
    g
}

fn bounds(result: &LayoutResult<(), ()>, id: &str) -> Bounds {
    result.node(id).unwrap().new_bounds
}

fn with_rankdir(rankdir: RankDir) -> LayoutOptions {
    LayoutOptions {
        rankdir,
        ..LayoutOptions::default()
    }
}

#[test]
fn layout_of_an_empty_graph_is_empty() {
    let result = layout(&G::new(), &LayoutOptions::default()).unwrap();
    assert!(result.nodes.is_empty());
    assert!(result.bendpoints.is_empty());
    assert_eq!(result.diagnostics.layers, 0);
    assert_eq!(result.diagnostics.components, 0);
    assert_eq!(result.diagnostics.downward_edge_percentage, 100.0);
}

#[test]
fn layout_places_a_single_node_at_the_margins() {
    let g = graph(&[("a", 50.0, 100.0)], &[]);
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(bounds(&result, "a"), Bounds::new(20.0, 20.0, 50.0, 100.0));
    assert_eq!(result.diagnostics.reversed_edges, 0);
    assert_eq!(result.diagnostics.layers, 1);
    assert_eq!(result.diagnostics.components, 1);
}

#[test]
fn layout_defaults_missing_node_sizes() {
    let g = graph(&[("a", 0.0, -3.0)], &[]);
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(bounds(&result, "a"), Bounds::new(20.0, 20.0, 120.0, 55.0));
    assert_eq!(
        result.node("a").unwrap().old_bounds,
        Bounds::new(0.0, 0.0, 0.0, -3.0)
    );
}

#[test]
fn layout_keeps_the_old_bounds_snapshot() {
    let mut g = G::new();
    g.add_node(Node::new("a", 30.0, 30.0, ()).at(300.0, 400.0));
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    let delta = result.node("a").unwrap();
    assert_eq!(delta.old_bounds, Bounds::new(300.0, 400.0, 30.0, 30.0));
    assert_eq!(delta.new_bounds, Bounds::new(20.0, 20.0, 30.0, 30.0));
}

#[test]
fn layout_stacks_a_chain_and_centers_it() {
    let g = graph(&[("a", 100.0, 40.0), ("b", 60.0, 40.0)], &[("a", "b")]);
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(bounds(&result, "a"), Bounds::new(20.0, 20.0, 100.0, 40.0));
    assert_eq!(bounds(&result, "b"), Bounds::new(40.0, 110.0, 60.0, 40.0));
    assert_eq!(result.diagnostics.layers, 2);
}

#[test]
fn layout_centers_a_parent_over_its_children() {
    let g = graph(
        &[("a", 100.0, 40.0), ("b", 100.0, 40.0), ("c", 100.0, 40.0)],
        &[("a", "b"), ("a", "c")],
    );
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(bounds(&result, "a"), Bounds::new(95.0, 20.0, 100.0, 40.0));
    assert_eq!(bounds(&result, "b"), Bounds::new(20.0, 110.0, 100.0, 40.0));
    assert_eq!(bounds(&result, "c"), Bounds::new(170.0, 110.0, 100.0, 40.0));
}

#[test]
fn layout_centers_nodes_vertically_within_their_layer() {
    let g = graph(
        &[("a", 50.0, 50.0), ("b", 50.0, 80.0), ("c", 50.0, 20.0)],
        &[("a", "b"), ("a", "c")],
    );
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    let b = bounds(&result, "b");
    let c = bounds(&result, "c");
    assert_eq!(b.y, 20.0 + 50.0 + 50.0);
    assert_eq!(c.y, b.y + 30.0);
    assert_eq!(b.center().y, c.center().y);
}

#[test]
fn layout_respects_ranksep_and_margins() {
    let g = graph(&[("a", 10.0, 10.0), ("b", 10.0, 10.0)], &[("a", "b")]);
    let options = LayoutOptions {
        ranksep: 5.0,
        marginx: 0.0,
        marginy: 7.0,
        ..LayoutOptions::default()
    };
    let result = layout(&g, &options).unwrap();
    assert_eq!(bounds(&result, "a"), Bounds::new(0.0, 7.0, 10.0, 10.0));
    assert_eq!(bounds(&result, "b"), Bounds::new(0.0, 22.0, 10.0, 10.0));
}

#[test]
fn layout_grows_upwards_for_bt() {
    let g = graph(&[("a", 100.0, 40.0), ("b", 100.0, 40.0)], &[("a", "b")]);
    let result = layout(&g, &with_rankdir(RankDir::BT)).unwrap();
    assert_eq!(bounds(&result, "a"), Bounds::new(20.0, 110.0, 100.0, 40.0));
    assert_eq!(bounds(&result, "b"), Bounds::new(20.0, 20.0, 100.0, 40.0));
}

#[test]
fn layout_grows_rightwards_for_lr_and_leftwards_for_rl() {
    let g = graph(&[("a", 100.0, 40.0), ("b", 100.0, 40.0)], &[("a", "b")]);

    let lr = layout(&g, &with_rankdir(RankDir::LR)).unwrap();
    assert_eq!(bounds(&lr, "a"), Bounds::new(20.0, 20.0, 100.0, 40.0));
    assert_eq!(bounds(&lr, "b"), Bounds::new(170.0, 20.0, 100.0, 40.0));

    let rl = layout(&g, &with_rankdir(RankDir::RL)).unwrap();
    assert_eq!(bounds(&rl, "a"), Bounds::new(170.0, 20.0, 100.0, 40.0));
    assert_eq!(bounds(&rl, "b"), Bounds::new(20.0, 20.0, 100.0, 40.0));
}

#[test]
fn layout_lr_is_tb_with_axes_swapped_for_square_nodes() {
    let nodes: Vec<(&str, f64, f64)> = ["a", "b", "c", "d", "e", "f"]
        .into_iter()
        .map(|id| (id, 60.0, 60.0))
        .collect();
    let g = graph(
        &nodes,
        &[
            ("a", "b"),
            ("a", "c"),
            ("b", "d"),
            ("c", "d"),
            ("a", "d"),
            ("d", "e"),
            ("f", "e"),
        ],
    );

    let tb = layout(&g, &LayoutOptions::default()).unwrap();
    let lr = layout(&g, &with_rankdir(RankDir::LR)).unwrap();
    for (t, l) in tb.nodes.iter().zip(&lr.nodes) {
        assert_eq!(t.id, l.id);
        assert_eq!(t.new_bounds.x, l.new_bounds.y, "{}", t.id);
        assert_eq!(t.new_bounds.y, l.new_bounds.x, "{}", t.id);
    }
}

#[test]
fn layout_reverses_cycle_edges_and_reports_them() {
    let nodes = [("a", 50.0, 50.0), ("b", 50.0, 50.0), ("c", 50.0, 50.0)];
    let g = graph(&nodes, &[("a", "b"), ("b", "c"), ("c", "a")]);
    let result = layout(&g, &LayoutOptions::default()).unwrap();

    assert_eq!(result.diagnostics.reversed_edges, 1);
    assert_eq!(result.diagnostics.layers, 3);
    let pct = result.diagnostics.downward_edge_percentage;
    assert!((pct - 200.0 / 3.0).abs() < 1e-9, "{pct}");
    assert!(bounds(&result, "a").y < bounds(&result, "b").y);
    assert!(bounds(&result, "b").y < bounds(&result, "c").y);
}

#[test]
fn layout_of_an_out_tree_points_every_edge_down() {
    let nodes: Vec<(&str, f64, f64)> = ["r", "a", "b", "c", "d", "e", "f"]
        .into_iter()
        .map(|id| (id, 40.0, 30.0))
        .collect();
    let g = graph(
        &nodes,
        &[
            ("r", "a"),
            ("r", "b"),
            ("a", "c"),
            ("a", "d"),
            ("b", "e"),
            ("e", "f"),
        ],
    );
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(result.diagnostics.reversed_edges, 0);
    assert_eq!(result.diagnostics.downward_edge_percentage, 100.0);
    assert_eq!(result.diagnostics.layers, 4);
    assert_eq!(result.diagnostics.components, 1);
    for (source, target) in [("r", "a"), ("a", "c"), ("e", "f")] {
        assert!(bounds(&result, source).bottom() < bounds(&result, target).y);
    }
}

#[test]
fn layout_keeps_layer_neighbours_nodesep_apart() {
    let sizes = [30.0, 80.0, 10.0, 120.0, 55.0, 70.0, 25.0];
    let ids = ["a", "b", "c", "d", "e", "f", "g"];
    let nodes: Vec<(&str, f64, f64)> = ids.iter().zip(sizes).map(|(&id, w)| (id, w, 40.0)).collect();
    let g = graph(
        &nodes,
        &[
            ("a", "c"),
            ("a", "d"),
            ("b", "c"),
            ("b", "g"),
            ("c", "e"),
            ("d", "f"),
            ("a", "f"),
            ("g", "e"),
        ],
    );
    let options = LayoutOptions {
        nodesep: 35.0,
        ..LayoutOptions::default()
    };
    let result = layout(&g, &options).unwrap();

    let mut rows: Vec<Vec<Bounds>> = Vec::new();
    for delta in &result.nodes {
        let b = delta.new_bounds;
        match rows.iter_mut().find(|row| row[0].y == b.y) {
            Some(row) => row.push(b),
            None => rows.push(vec![b]),
        }
    }
    for row in &mut rows {
        row.sort_by(|l, r| l.x.total_cmp(&r.x));
        for pair in row.windows(2) {
            assert!(pair[1].x - pair[0].right() >= 35.0 - 1e-9, "{pair:?}");
        }
    }
}

#[test]
fn layout_is_deterministic() {
    let nodes: Vec<(String, f64, f64)> = (0..12)
        .map(|i| (format!("n{i}"), 40.0 + (i % 3) as f64 * 15.0, 30.0))
        .collect();
    let node_refs: Vec<(&str, f64, f64)> =
        nodes.iter().map(|(id, w, h)| (id.as_str(), *w, *h)).collect();
    let edges = [
        ("n0", "n1"),
        ("n1", "n2"),
        ("n2", "n0"),
        ("n0", "n5"),
        ("n3", "n5"),
        ("n5", "n9"),
        ("n1", "n9"),
        ("n4", "n6"),
        ("n6", "n7"),
        ("n7", "n4"),
        ("n8", "n10"),
        ("n10", "n11"),
        ("n8", "n11"),
    ];
    let g = graph(&node_refs, &edges);

    let first = layout(&g, &LayoutOptions::default()).unwrap();
    let second = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(first, second);
    for (a, b) in first.nodes.iter().zip(&second.nodes) {
        assert_eq!(a.new_bounds.x.to_bits(), b.new_bounds.x.to_bits());
        assert_eq!(a.new_bounds.y.to_bits(), b.new_bounds.y.to_bits());
    }
}

#[test]
fn layout_packs_components_without_overlap() {
    let g = graph(
        &[("c", 30.0, 30.0), ("a", 100.0, 40.0), ("b", 100.0, 40.0)],
        &[("a", "b")],
    );
    let result = layout(&g, &LayoutOptions::default()).unwrap();

    assert_eq!(result.diagnostics.components, 2);
    assert_eq!(result.diagnostics.layers, 2);
    assert_eq!(bounds(&result, "a"), Bounds::new(20.0, 20.0, 100.0, 40.0));
    assert_eq!(bounds(&result, "b"), Bounds::new(20.0, 110.0, 100.0, 40.0));
    assert_eq!(bounds(&result, "c"), Bounds::new(170.0, 20.0, 30.0, 30.0));
    assert!(!bounds(&result, "c").intersects(&bounds(&result, "a")));
}

#[test]
fn layout_uses_componentsep_between_components() {
    let g = graph(
        &[("c", 30.0, 30.0), ("a", 100.0, 40.0), ("b", 100.0, 40.0)],
        &[("a", "b")],
    );
    let options = LayoutOptions {
        componentsep: Some(10.0),
        ..LayoutOptions::default()
    };
    let result = layout(&g, &options).unwrap();
    assert_eq!(bounds(&result, "c").x, 130.0);
}

#[test]
fn layout_of_a_component_matches_its_standalone_layout() {
    let edges = [("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")];
    let component = [
        ("a", 60.0, 30.0),
        ("b", 40.0, 30.0),
        ("c", 80.0, 30.0),
        ("d", 50.0, 30.0),
    ];
    let alone = layout(&graph(&component, &edges), &LayoutOptions::default()).unwrap();

    let mut with_other = component.to_vec();
    with_other.push(("x", 20.0, 20.0));
    with_other.push(("y", 20.0, 20.0));
    let mut more_edges = edges.to_vec();
    more_edges.push(("x", "y"));
    let packed = layout(&graph(&with_other, &more_edges), &LayoutOptions::default()).unwrap();

    for (id, _, _) in component {
        assert_eq!(bounds(&alone, id), bounds(&packed, id), "{id}");
    }
    let bbox = alone.bounding_box().unwrap();
    let x = bounds(&packed, "x");
    assert!(x.x >= bbox.right() + 50.0 - 1e-9);
}

#[test]
fn layout_straightens_long_edges_through_dummy_nodes() {
    let g = graph(
        &[("a", 50.0, 30.0), ("b", 50.0, 30.0), ("c", 50.0, 30.0)],
        &[("a", "b"), ("b", "c"), ("a", "c")],
    );
    let result = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(result.diagnostics.layers, 3);
    assert_eq!(result.nodes.len(), 3);
    assert!(bounds(&result, "b").y < bounds(&result, "c").y);
    assert!(!bounds(&result, "b").intersects(&bounds(&result, "c")));
}

#[test]
fn layout_clears_existing_bend_points() {
    let mut g = graph(&[("a", 40.0, 40.0), ("b", 40.0, 40.0)], &[]);
    let bends = vec![Point { x: 1.0, y: 2.0 }];
    g.add_edge(Edge::new("plain", "a", "b", ()));
    g.add_edge(Edge::new("bent", "a", "b", ()).with_bendpoints(bends.clone()));
    g.add_edge(Edge::new("loop", "a", "a", ()).with_bendpoints(bends.clone()));
    g.add_edge(Edge::new("dangling", "a", "zzz", ()).with_bendpoints(bends.clone()));

    let result = layout(&g, &LayoutOptions::default()).unwrap();
    let cleared: Vec<&str> = result.bendpoints.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(cleared, vec!["bent", "loop"]);
    assert_eq!(result.bendpoints[0].old_bendpoints, bends);
}

#[test]
fn layout_ignores_self_loops_and_unknown_endpoints() {
    let with_noise = graph(
        &[("a", 40.0, 40.0), ("b", 40.0, 40.0)],
        &[("a", "b"), ("a", "a"), ("b", "nested-child"), ("ghost", "a")],
    );
    let clean = graph(&[("a", 40.0, 40.0), ("b", 40.0, 40.0)], &[("a", "b")]);

    let noisy = layout(&with_noise, &LayoutOptions::default()).unwrap();
    let expected = layout(&clean, &LayoutOptions::default()).unwrap();
    assert_eq!(noisy.nodes, expected.nodes);
    assert_eq!(noisy.diagnostics.reversed_edges, 0);
    assert_eq!(noisy.diagnostics.downward_edge_percentage, 100.0);
}

#[test]
fn layout_rejects_duplicate_node_ids() {
    let g = graph(&[("a", 10.0, 10.0), ("a", 20.0, 20.0)], &[]);
    assert_eq!(
        layout(&g, &LayoutOptions::default()),
        Err(Error::DuplicateNode { id: "a".to_string() })
    );
}

#[test]
fn layout_falls_back_to_defaults_for_invalid_options() {
    let g = graph(&[("a", 100.0, 40.0), ("b", 100.0, 40.0)], &[("a", "b")]);
    let options = LayoutOptions {
        nodesep: f64::NAN,
        ranksep: -1.0,
        marginx: f64::INFINITY,
        marginy: -20.0,
        iterations: 0,
        ..LayoutOptions::default()
    };
    let result = layout(&g, &options).unwrap();
    let expected = layout(&g, &LayoutOptions::default()).unwrap();
    assert_eq!(result, expected);
}
