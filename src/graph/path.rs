//! Path reconstruction from traversal metadata.

use crate::graph::metadata::TraversalMetadata;
use crate::graph::store::{CollabGraph, VertexId};
use crate::types::{CollabPath, Hop};

/// Walk predecessor links from `to` back to `from`.
///
/// Returns the vertices in source-to-destination order, or an empty vector
/// when the chain ends before reaching `from`. A chain longer than the
/// graph itself can only come from stale metadata and is reported as empty
/// too.
pub fn report_path(
    graph: &CollabGraph,
    meta: &TraversalMetadata,
    from: VertexId,
    to: VertexId,
) -> Vec<VertexId> {
    // LIFO: pushed destination-first, popped source-first.
    let mut stack: Vec<VertexId> = Vec::new();
    let mut current = to;

    while current != from {
        if stack.len() > graph.len() {
            tracing::warn!(
                from = graph.name(from),
                to = graph.name(to),
                "predecessor chain does not terminate"
            );
            return Vec::new();
        }
        stack.push(current);
        match meta.predecessor(current) {
            Some(prev) => current = prev,
            None => return Vec::new(),
        }
    }
    stack.push(from);

    let mut path = Vec::with_capacity(stack.len());
    while let Some(id) = stack.pop() {
        path.push(id);
    }
    path
}

/// Reconstruct the path from `from` to `to` with a song for every hop.
///
/// `None` means no path exists.
pub fn reconstruct(
    graph: &CollabGraph,
    meta: &TraversalMetadata,
    from: VertexId,
    to: VertexId,
) -> Option<CollabPath> {
    let ids = report_path(graph, meta, from, to);
    if ids.is_empty() {
        return None;
    }

    let mut hops = Vec::with_capacity(ids.len() - 1);
    for pair in ids.windows(2) {
        let (x, y) = (pair[0], pair[1]);
        let Some(song) = graph.edge_label(x, y) else {
            tracing::warn!(
                from = graph.name(x),
                to = graph.name(y),
                "predecessor link without a collaboration"
            );
            return None;
        };
        hops.push(Hop {
            from: graph.name(x).to_string(),
            to: graph.name(y).to_string(),
            song: song.to_string(),
        });
    }

    Some(CollabPath {
        source: graph.name(from).to_string(),
        hops,
    })
}
