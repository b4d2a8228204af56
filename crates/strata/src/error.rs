/// Failures of the layered pipeline.
///
/// Invalid geometry and options never end up here; they are replaced by defaults up front. The
/// remaining variants signal an internal invariant that did not hold for the given input shape,
/// which is what [`crate::Orchestrator`] hands over to a fallback engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("cycle survived cycle breaking ({remaining} nodes left unranked)")]
    CycleDetected { remaining: usize },

    #[error("edge #{origin} spans {span} layers after normalization")]
    ImproperEdge { origin: usize, span: i64 },

    #[error("block constraint graph of layer {layer} contains a cycle")]
    BlockCycle { layer: usize },

    #[error("non-finite coordinate computed for node {id}")]
    NonFiniteCoordinate { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
