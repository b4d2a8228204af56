#![forbid(unsafe_code)]

//! Headless layered graph layout.
//!
//! `strata` places the nodes of a directed graph in ranks: cycles are broken with a greedy
//! feedback arc set, ranks come from a longest-path layering, long edges are split by dummy
//! nodes, layers are ordered by barycenter sweeps and x coordinates are assigned with
//! Brandes & Köpf. Disconnected components are laid out separately and packed side by side.
//!
//! The engine is a pure function of its input snapshot: it never touches the caller's objects and
//! returns a [`LayoutResult`] describing where each node should move.

pub use strata_graphlib as graphlib;

pub mod acyclic;
pub mod components;
pub mod coordinate_system;
pub mod engine;
pub mod error;
pub mod layered;
pub mod model;
pub mod normalize;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;

pub use engine::{GridLayout, Layered, LayoutEngine, Orchestrator};
pub use error::{Error, Result};
pub use model::{
    BendpointClear, Bounds, Diagnostics, Edge, Graph, LayoutResult, Node, NodeDelta, Point,
};
pub use options::{LayoutOptions, RankDir};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lays out `graph` with the layered engine and no fallback.
pub fn layout<N, E>(graph: &Graph<N, E>, options: &LayoutOptions) -> Result<LayoutResult<N, E>>
where
    N: Clone,
    E: Clone,
{
    pipeline::run(graph, options)
}
