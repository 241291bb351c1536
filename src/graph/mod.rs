//! Graph layer: in-memory collaboration graph, traversal state, traversals
//! and path reconstruction.

pub mod metadata;
pub mod path;
pub mod store;
pub mod traversal;

pub use metadata::{TraversalMetadata, VertexState};
pub use store::{CollabGraph, GraphStats, VertexId};
pub use traversal::GraphTraversal;
