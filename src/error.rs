//! Error types for graph construction and clustering

use thiserror::Error;

/// Errors raised while building or mutating a [`Graph`](crate::graph::Graph).
///
/// Vertex ids are carried pre-formatted so the error stays independent of the
/// vertex type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge (or adjacency entry) joins a vertex to itself.
    #[error("self-loop on vertex {0}")]
    SelfLoop(String),

    /// The adjacency mapping lists `from -> to` without `to -> from`.
    #[error("asymmetric adjacency: {from} lists {to} but {to} does not list {from}")]
    AsymmetricEdge { from: String, to: String },

    /// The same vertex id was declared twice in an adjacency mapping.
    #[error("duplicate vertex id {0}")]
    DuplicateVertex(String),

    /// Attempted to remove an edge that is not in the graph.
    #[error("edge {{{0}, {1}}} not found")]
    EdgeNotFound(String, String),

    /// Queried a vertex that is not in the graph.
    #[error("vertex {0} not found")]
    VertexNotFound(String),
}

impl GraphError {
    pub(crate) fn self_loop<V: std::fmt::Debug>(v: &V) -> Self {
        GraphError::SelfLoop(format!("{v:?}"))
    }

    pub(crate) fn asymmetric<V: std::fmt::Debug>(from: &V, to: &V) -> Self {
        GraphError::AsymmetricEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn duplicate<V: std::fmt::Debug>(v: &V) -> Self {
        GraphError::DuplicateVertex(format!("{v:?}"))
    }

    pub(crate) fn edge_not_found<V: std::fmt::Debug>(u: &V, v: &V) -> Self {
        GraphError::EdgeNotFound(format!("{u:?}"), format!("{v:?}"))
    }

    pub(crate) fn vertex_not_found<V: std::fmt::Debug>(v: &V) -> Self {
        GraphError::VertexNotFound(format!("{v:?}"))
    }
}

/// Errors raised by the clustering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The cancellation flag was raised before `iteration` started.
    #[error("clustering cancelled before iteration {iteration}")]
    Cancelled { iteration: usize },

    /// A single vertex pair has more shortest paths than the configured budget.
    #[error("shortest path budget of {limit} paths exceeded")]
    PathBudgetExceeded { limit: usize },

    /// The betweenness tracker ran out of edges while the working graph
    /// still had some left.
    #[error("no scored edge left at iteration {iteration}")]
    TrackerExhausted { iteration: usize },
}

/// Result alias for the clustering engine.
pub type Result<T> = std::result::Result<T, ClusterError>;
