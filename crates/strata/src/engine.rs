//! Layout engines and the fallback strategy.

use crate::error::Result;
use crate::model::{Bounds, Diagnostics, Graph, LayoutResult, NodeDelta};
use crate::options::{LayoutOptions, node_size_or_default};
use crate::pipeline;
use rustc_hash::FxHashSet;

/// Anything that turns a graph snapshot into a [`LayoutResult`].
pub trait LayoutEngine<N, E> {
    fn name(&self) -> &str;

    fn layout(&self, graph: &Graph<N, E>, options: &LayoutOptions) -> Result<LayoutResult<N, E>>;
}

/// The layered (Sugiyama-style) engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layered;

impl<N: Clone, E: Clone> LayoutEngine<N, E> for Layered {
    fn name(&self) -> &str {
        "layered"
    }

    fn layout(&self, graph: &Graph<N, E>, options: &LayoutOptions) -> Result<LayoutResult<N, E>> {
        pipeline::run(graph, options)
    }
}

/// Row-major grid in input order, `ceil(sqrt(n))` columns wide.
///
/// Cells are as large as the largest node and spaced by `nodesep`/`ranksep`. Edges and
/// `rankdir` are ignored, so this engine cannot fail. Its diagnostics only report the row count
/// as `layers`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayout;

impl<N: Clone, E: Clone> LayoutEngine<N, E> for GridLayout {
    fn name(&self) -> &str {
        "grid"
    }

    fn layout(&self, graph: &Graph<N, E>, options: &LayoutOptions) -> Result<LayoutResult<N, E>> {
        let opts = options.sanitized();
        let n = graph.nodes.len();
        let columns = (n as f64).sqrt().ceil().max(1.0) as usize;
        let rows = n.div_ceil(columns);

        let sizes: Vec<(f64, f64)> = graph
            .nodes
            .iter()
            .map(|node| node_size_or_default(node.width, node.height))
            .collect();
        let cell_w = sizes.iter().map(|s| s.0).fold(0.0, f64::max);
        let cell_h = sizes.iter().map(|s| s.1).fold(0.0, f64::max);

        let nodes = graph
            .nodes
            .iter()
            .zip(&sizes)
            .enumerate()
            .map(|(i, (node, &(w, h)))| {
                let (row, col) = (i / columns, i % columns);
                NodeDelta {
                    id: node.id.clone(),
                    handle: node.handle.clone(),
                    old_bounds: node.bounds(),
                    new_bounds: Bounds::new(
                        opts.marginx + col as f64 * (cell_w + opts.nodesep),
                        opts.marginy + row as f64 * (cell_h + opts.ranksep),
                        w,
                        h,
                    ),
                }
            })
            .collect();

        let ids: FxHashSet<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
        Ok(LayoutResult {
            nodes,
            bendpoints: pipeline::bendpoint_clears(graph, |id| ids.contains(id)),
            diagnostics: Diagnostics {
                layers: rows,
                ..Diagnostics::default()
            },
        })
    }
}

/// Runs a primary engine and, when it fails, an optional fallback engine.
///
/// Without a fallback the primary error is returned unchanged.
pub struct Orchestrator<N, E> {
    options: LayoutOptions,
    primary: Box<dyn LayoutEngine<N, E>>,
    fallback: Option<Box<dyn LayoutEngine<N, E>>>,
}

impl<N: Clone + 'static, E: Clone + 'static> Orchestrator<N, E> {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            primary: Box::new(Layered),
            fallback: None,
        }
    }

    /// Replaces the primary engine (the layered engine by default).
    pub fn with_engine(mut self, engine: impl LayoutEngine<N, E> + 'static) -> Self {
        self.primary = Box::new(engine);
        self
    }

    pub fn with_fallback(mut self, engine: impl LayoutEngine<N, E> + 'static) -> Self {
        self.fallback = Some(Box::new(engine));
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn compute_layout(&self, graph: &Graph<N, E>) -> Result<LayoutResult<N, E>> {
        let err = match self.primary.layout(graph, &self.options) {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };
        let Some(fallback) = &self.fallback else {
            return Err(err);
        };

        tracing::warn!(
            error = %err,
            primary = self.primary.name(),
            fallback = fallback.name(),
            "layout failed; using fallback engine"
        );
        let mut result = fallback.layout(graph, &self.options)?;
        result.diagnostics.fallback = true;
        Ok(result)
    }
}
