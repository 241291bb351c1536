//! Path-finding traversals over the collaboration graph.
//!
//! Each traversal only writes visited flags and predecessors into the
//! [`TraversalMetadata`] it is given; turning that into a path is the job of
//! [`crate::graph::path`]. Callers are expected to reset the metadata
//! before every traversal.

use std::collections::VecDeque;

use crate::graph::metadata::TraversalMetadata;
use crate::graph::store::{CollabGraph, VertexId};

// ---------------------------------------------------------------------------
// GraphTraversal
// ---------------------------------------------------------------------------

/// BFS, DFS and exclusion BFS over a borrowed graph.
pub struct GraphTraversal<'a> {
    graph: &'a CollabGraph,
    meta: &'a mut TraversalMetadata,
}

/// One suspended DFS call: the vertex and the next neighbor to look at.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: VertexId,
    next: usize,
}

impl<'a> GraphTraversal<'a> {
    /// Create a traversal writing into `meta`.
    pub fn new(graph: &'a CollabGraph, meta: &'a mut TraversalMetadata) -> Self {
        Self { graph, meta }
    }

    // -------------------------------------------------------------------
    // bfs
    // -------------------------------------------------------------------

    /// Breadth-first search from `from`.
    ///
    /// Every newly discovered neighbor gets the current vertex as its
    /// predecessor, which yields a shortest (fewest hops) chain back to
    /// `from`. Scanning of a vertex's neighbor list stops once `to` shows up
    /// in it; the queue itself is always drained.
    pub fn bfs(&mut self, from: VertexId, to: VertexId) {
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        self.meta.mark(from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.graph.neighbors(current) {
                if !self.meta.is_marked(neighbor) {
                    self.meta.set_predecessor(neighbor, current);
                    self.meta.mark(neighbor);
                    queue.push_back(neighbor);
                }
                if neighbor == to {
                    break;
                }
            }
        }

        tracing::trace!(visited = self.meta.visited_count(), "bfs finished");
    }

    // -------------------------------------------------------------------
    // dfs
    // -------------------------------------------------------------------

    /// Depth-first search from `from`. Records whichever route it stumbles
    /// on, not necessarily the shortest.
    ///
    /// Runs on an explicit frame stack but behaves like the recursive form:
    /// a vertex is marked when entered, an unmarked neighbor gets the
    /// current vertex as predecessor and is entered unless it is `to`. When
    /// it is `to`, the current frame stops scanning and returns to its
    /// caller, which keeps scanning its own remaining neighbors. `to` itself
    /// is never marked, so a later frame can take over as its predecessor.
    pub fn dfs(&mut self, from: VertexId, to: VertexId) {
        let mut stack: Vec<Frame> = Vec::new();
        self.meta.mark(from);
        stack.push(Frame {
            vertex: from,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let current = frame.vertex;
            let Some(neighbor) = self.graph.neighbor_at(current, frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            if self.meta.is_marked(neighbor) {
                continue;
            }
            self.meta.set_predecessor(neighbor, current);
            if neighbor == to {
                stack.pop();
            } else {
                self.meta.mark(neighbor);
                stack.push(Frame {
                    vertex: neighbor,
                    next: 0,
                });
            }
        }

        tracing::trace!(visited = self.meta.visited_count(), "dfs finished");
    }

    // -------------------------------------------------------------------
    // bfs_excluding
    // -------------------------------------------------------------------

    /// BFS that treats every vertex in `excluded` as already visited.
    ///
    /// Returns `false` without traversing when `from` or `to` is excluded,
    /// in which case no path can be reported.
    pub fn bfs_excluding(&mut self, from: VertexId, to: VertexId, excluded: &[VertexId]) -> bool {
        for &id in excluded {
            self.meta.mark(id);
        }

        if self.meta.is_marked(from) || self.meta.is_marked(to) {
            tracing::debug!("endpoint is excluded, skipping traversal");
            return false;
        }

        self.bfs(from, to);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
