//! Per-query traversal state, kept outside the graph.
//!
//! One slot per vertex, indexed by [`VertexId`]. The slots are only valid
//! between a [`TraversalMetadata::reset`] and the next one.

use crate::graph::store::VertexId;

/// Visited flag and discovery predecessor of a single vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexState {
    pub visited: bool,
    pub predecessor: Option<VertexId>,
}

/// Arena of [`VertexState`] slots for one graph.
#[derive(Debug, Clone, Default)]
pub struct TraversalMetadata {
    states: Vec<VertexState>,
}

impl TraversalMetadata {
    /// Fresh metadata sized for `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            states: vec![VertexState::default(); vertex_count],
        }
    }

    /// Clear every slot and resize to `vertex_count`.
    pub fn reset(&mut self, vertex_count: usize) {
        self.states.clear();
        self.states.resize(vertex_count, VertexState::default());
    }

    pub fn mark(&mut self, id: VertexId) {
        self.states[id.index()].visited = true;
    }

    pub fn is_marked(&self, id: VertexId) -> bool {
        self.states[id.index()].visited
    }

    pub fn set_predecessor(&mut self, id: VertexId, predecessor: VertexId) {
        self.states[id.index()].predecessor = Some(predecessor);
    }

    pub fn predecessor(&self, id: VertexId) -> Option<VertexId> {
        self.states[id.index()].predecessor
    }

    pub fn state(&self, id: VertexId) -> VertexState {
        self.states[id.index()]
    }

    /// Number of vertices currently marked.
    pub fn visited_count(&self) -> usize {
        self.states.iter().filter(|s| s.visited).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
