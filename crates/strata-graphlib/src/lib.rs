#![forbid(unsafe_code)]

//! Graph container APIs used by `strata`.
//!
//! Nodes and edges live in arenas and are addressed by plain `usize` indices. Adjacency is never
//! stored as ground truth: it is derived from the edge list on demand and cached until the next
//! structural mutation.

pub mod alg;
mod disjoint_set;
mod graph;

pub use disjoint_set::DisjointSet;
pub use graph::DiGraph;
