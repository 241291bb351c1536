//! Query orchestration: validate names, reset traversal state, traverse,
//! reconstruct, render.

use std::io::{self, Write};

use crate::graph::path::reconstruct;
use crate::graph::{CollabGraph, GraphTraversal, TraversalMetadata, VertexId};
use crate::types::CollabPath;

/// Default line printed after the last hop of a path.
pub const DEFAULT_SENTINEL: &str = "***";

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Which traversal a path query runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Breadth-first, shortest path.
    Bfs,
    /// Depth-first, first path found.
    Dfs,
}

/// A path query between two artists, named exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Path {
        strategy: Strategy,
        from: String,
        to: String,
    },
    /// BFS that may not pass through (or start/end at) any excluded artist.
    Excluding {
        from: String,
        to: String,
        excluded: Vec<String>,
    },
}

impl Query {
    pub fn bfs(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Path {
            strategy: Strategy::Bfs,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn dfs(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Path {
            strategy: Strategy::Dfs,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn excluding<I, S>(from: impl Into<String>, to: impl Into<String>, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Excluding {
            from: from.into(),
            to: to.into(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Source and destination names.
    pub fn endpoints(&self) -> (&str, &str) {
        match self {
            Self::Path { from, to, .. } | Self::Excluding { from, to, .. } => {
                (from.as_str(), to.as_str())
            }
        }
    }

    fn excluded(&self) -> &[String] {
        match self {
            Self::Path { .. } => &[],
            Self::Excluding { excluded, .. } => excluded,
        }
    }
}

// ---------------------------------------------------------------------------
// QueryOutcome
// ---------------------------------------------------------------------------

/// Result of running a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// A path was found; the self-path has no hops.
    Found(CollabPath),
    /// Both artists exist but nothing connects them.
    NoPath { from: String, to: String },
    /// Every name that is not in the graph, in the order it was checked.
    /// No traversal ran.
    NotFound(Vec<String>),
}

impl QueryOutcome {
    /// Render the outcome as output lines.
    pub fn write_to<W: Write>(&self, out: &mut W, sentinel: &str) -> io::Result<()> {
        match self {
            Self::Found(path) => {
                for hop in &path.hops {
                    writeln!(
                        out,
                        "\"{}\" collaborated with \"{}\" in \"{}\".",
                        hop.from, hop.to, hop.song
                    )?;
                }
                writeln!(out, "{sentinel}")
            }
            Self::NoPath { from, to } => {
                writeln!(out, "A path does not exist between \"{from}\" and \"{to}\".")
            }
            Self::NotFound(names) => {
                for name in names {
                    writeln!(out, "\"{name}\" was not found in the dataset :(")?;
                }
                Ok(())
            }
        }
    }

    pub fn path(&self) -> Option<&CollabPath> {
        match self {
            Self::Found(path) => Some(path),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// QueryEngine
// ---------------------------------------------------------------------------

/// Runs queries one after another against a shared graph.
///
/// Owns the traversal metadata and clears it at the start of every query,
/// so no state from a previous query can leak into the next one.
pub struct QueryEngine<'g> {
    graph: &'g CollabGraph,
    meta: TraversalMetadata,
}

impl<'g> QueryEngine<'g> {
    pub fn new(graph: &'g CollabGraph) -> Self {
        Self {
            graph,
            meta: TraversalMetadata::new(graph.len()),
        }
    }

    pub fn graph(&self) -> &'g CollabGraph {
        self.graph
    }

    /// Validate and run a query.
    pub fn run(&mut self, query: &Query) -> QueryOutcome {
        let graph = self.graph;
        self.meta.reset(graph.len());

        let missing = self.validate(query);
        let (from_name, to_name) = query.endpoints();
        let (from, to) = match (graph.vertex_id(from_name), graph.vertex_id(to_name)) {
            (Some(from), Some(to)) if missing.is_empty() => (from, to),
            _ => {
                tracing::debug!(?missing, "query names not in graph, skipping traversal");
                return QueryOutcome::NotFound(missing);
            }
        };

        let mut traversal = GraphTraversal::new(graph, &mut self.meta);
        let traversed = match query {
            Query::Path {
                strategy: Strategy::Bfs,
                ..
            } => {
                traversal.bfs(from, to);
                true
            }
            Query::Path {
                strategy: Strategy::Dfs,
                ..
            } => {
                traversal.dfs(from, to);
                true
            }
            Query::Excluding { excluded, .. } => {
                let excluded: Vec<VertexId> = excluded
                    .iter()
                    .filter_map(|name| graph.vertex_id(name))
                    .collect();
                traversal.bfs_excluding(from, to, &excluded)
            }
        };

        let outcome = if traversed {
            reconstruct(graph, &self.meta, from, to).map(QueryOutcome::Found)
        } else {
            None
        };
        let outcome = outcome.unwrap_or_else(|| QueryOutcome::NoPath {
            from: from_name.to_string(),
            to: to_name.to_string(),
        });

        tracing::debug!(
            from = from_name,
            to = to_name,
            hops = outcome.path().map(CollabPath::hop_count),
            "query finished"
        );
        outcome
    }

    /// Every name in `query` that is not a vertex: source, destination,
    /// then exclusions in input order.
    fn validate(&self, query: &Query) -> Vec<String> {
        let (from, to) = query.endpoints();
        [from, to]
            .into_iter()
            .chain(query.excluded().iter().map(String::as_str))
            .filter(|name| !self.graph.is_vertex(name))
            .map(str::to_string)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Artist;
    use pretty_assertions::assert_eq;

    fn chain() -> CollabGraph {
        CollabGraph::from_artists([
            Artist::with_songs("A", ["X"]),
            Artist::with_songs("B", ["X", "Y"]),
            Artist::with_songs("C", ["Y"]),
        ])
    }

    fn render(outcome: &QueryOutcome) -> String {
        let mut out = Vec::new();
        outcome.write_to(&mut out, DEFAULT_SENTINEL).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bfs_renders_hops_and_sentinel() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        let outcome = engine.run(&Query::bfs("A", "C"));
        assert_eq!(
            render(&outcome),
            "\"A\" collaborated with \"B\" in \"X\".\n\
             \"B\" collaborated with \"C\" in \"Y\".\n\
             ***\n"
        );
    }

    #[test]
    fn self_query_prints_only_sentinel() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        assert_eq!(render(&engine.run(&Query::bfs("B", "B"))), "***\n");
        assert_eq!(render(&engine.run(&Query::dfs("B", "B"))), "***\n");
    }

    #[test]
    fn excluded_middle_means_no_path() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        let outcome = engine.run(&Query::excluding("A", "C", ["B"]));
        assert_eq!(
            render(&outcome),
            "A path does not exist between \"A\" and \"C\".\n"
        );
    }

    #[test]
    fn excluded_endpoint_means_no_path_even_for_self_query() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        let outcome = engine.run(&Query::excluding("A", "A", ["A"]));
        assert_eq!(
            outcome,
            QueryOutcome::NoPath {
                from: "A".into(),
                to: "A".into()
            }
        );
    }

    #[test]
    fn unknown_names_skip_traversal() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        let outcome = engine.run(&Query::bfs("Z", "A"));
        assert_eq!(render(&outcome), "\"Z\" was not found in the dataset :(\n");
    }

    #[test]
    fn all_unknown_names_are_reported_in_order() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        let outcome = engine.run(&Query::excluding("Q", "A", ["B", "R", "S"]));
        assert_eq!(
            outcome,
            QueryOutcome::NotFound(vec!["Q".into(), "R".into(), "S".into()])
        );

        let outcome = engine.run(&Query::excluding("A", "C", ["R"]));
        assert_eq!(outcome, QueryOutcome::NotFound(vec!["R".into()]));
    }

    #[test]
    fn repeated_query_gives_identical_outcome() {
        let graph = chain();
        let mut engine = QueryEngine::new(&graph);
        let first = engine.run(&Query::dfs("C", "A"));
        let _ = engine.run(&Query::excluding("A", "C", ["B"]));
        let second = engine.run(&Query::dfs("C", "A"));
        assert_eq!(first, second);
        assert!(first.path().is_some());
    }

    #[test]
    fn disconnected_artists_have_no_path() {
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["X"]),
            Artist::with_songs("B", ["Y"]),
        ]);
        let mut engine = QueryEngine::new(&graph);
        for query in [Query::bfs("A", "B"), Query::dfs("A", "B")] {
            assert_eq!(
                engine.run(&query),
                QueryOutcome::NoPath {
                    from: "A".into(),
                    to: "B".into()
                }
            );
        }
    }
}
