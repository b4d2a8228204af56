//! Input snapshot and layout result types.
//!
//! `N` and `E` are the caller's opaque handles for visual nodes and connections. The engine
//! clones them into the result so the apply step can find its objects again; it never inspects
//! them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned box with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// True when the interiors overlap; touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<N> {
    pub id: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Current top-left position, used for the `old_bounds` snapshot.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub handle: N,
}

impl<N> Node<N> {
    pub fn new(id: impl Into<String>, width: f64, height: f64, handle: N) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            x: 0.0,
            y: 0.0,
            handle,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<E> {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub bendpoints: Vec<Point>,
    #[serde(default)]
    pub handle: E,
}

impl<E> Edge<E> {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        handle: E,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            bendpoints: Vec::new(),
            handle,
        }
    }

    pub fn with_bendpoints(mut self, bendpoints: Vec<Point>) -> Self {
        self.bendpoints = bendpoints;
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A graph snapshot as handed over by the extractor.
///
/// Handles missing from serialized input deserialize to `Default::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize, E: Serialize",
    deserialize = "N: Deserialize<'de> + Default, E: Deserialize<'de> + Default"
))]
pub struct Graph<N, E> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Node<N>>,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<E>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node<N>) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, edge: Edge<E>) -> &mut Self {
        self.edges.push(edge);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDelta<N> {
    pub id: String,
    pub handle: N,
    pub old_bounds: Bounds,
    pub new_bounds: Bounds,
}

/// A connection whose existing bend points the apply step should clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendpointClear<E> {
    pub id: String,
    pub handle: E,
    pub old_bendpoints: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub reversed_edges: usize,
    pub layers: usize,
    pub components: usize,
    pub downward_edge_percentage: f64,
    /// Edge crossings left in the final layer orderings, summed over components.
    pub crossings: usize,
    /// Set when the result was produced by a fallback engine.
    pub fallback: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            reversed_edges: 0,
            layers: 0,
            components: 0,
            downward_edge_percentage: 100.0,
            crossings: 0,
            fallback: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize, E: Serialize",
    deserialize = "N: Deserialize<'de>, E: Deserialize<'de>"
))]
pub struct LayoutResult<N, E> {
    pub nodes: Vec<NodeDelta<N>>,
    pub bendpoints: Vec<BendpointClear<E>>,
    pub diagnostics: Diagnostics,
}

impl<N, E> LayoutResult<N, E> {
    pub fn node(&self, id: &str) -> Option<&NodeDelta<N>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Union of all `new_bounds`, or `None` for an empty result.
    pub fn bounding_box(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(|n| n.new_bounds)
            .reduce(|acc, b| acc.union(&b))
    }
}
