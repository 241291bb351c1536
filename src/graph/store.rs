//! In-memory collaboration graph.
//!
//! Vertices are artists, edges are songs shared by two artists. The graph
//! is built once from the dataset and never changes afterwards; per-query
//! traversal state lives outside it in [`TraversalMetadata`].
//!
//! [`TraversalMetadata`]: crate::graph::metadata::TraversalMetadata

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::{self, Write};

use serde::Serialize;

use crate::types::Artist;

// ---------------------------------------------------------------------------
// VertexId
// ---------------------------------------------------------------------------

/// Index of an artist inside a [`CollabGraph`]. Only meaningful for the
/// graph that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Aggregate statistics about the loaded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub artists: usize,
    pub collaborations: usize,
    pub songs: usize,
}

// ---------------------------------------------------------------------------
// CollabGraph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Edge {
    to: VertexId,
    song: String,
}

#[derive(Debug, Clone)]
struct Vertex {
    artist: Artist,
    edges: Vec<Edge>,
}

/// Undirected artist graph with song-labelled edges.
///
/// Neighbor lists keep insertion order, and insertion order is fixed by the
/// order artists were loaded in, so every traversal over the same dataset
/// enumerates neighbors identically.
#[derive(Debug, Clone, Default)]
pub struct CollabGraph {
    vertices: Vec<Vertex>,
    index: HashMap<String, VertexId>,
    edge_count: usize,
}

impl CollabGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from artists in dataset order.
    pub fn from_artists(artists: impl IntoIterator<Item = Artist>) -> Self {
        let mut graph = Self::new();
        graph.populate(artists);
        graph
    }

    /// Insert the given artists and derive collaboration edges.
    ///
    /// Artists whose name is already present are merged into the existing
    /// vertex. For each pair `(i, j)` with `i < j` in load order that shares
    /// a song, one edge is added, labelled with the first song in `i`'s list
    /// that `j` also has. Pairs are visited in ascending `(i, j)` order and
    /// the edge is appended to both neighbor lists at that moment.
    pub fn populate(&mut self, artists: impl IntoIterator<Item = Artist>) {
        for artist in artists {
            self.insert_vertex(artist);
        }
        self.rebuild_edges();

        tracing::info!(
            artists = self.vertices.len(),
            collaborations = self.edge_count,
            "collaboration graph populated"
        );
    }

    fn insert_vertex(&mut self, artist: Artist) {
        match self.index.get(&artist.name) {
            Some(&id) => {
                tracing::debug!(artist = %artist.name, "merging repeated artist record");
                let existing = &mut self.vertices[id.0].artist;
                for song in artist.songs {
                    existing.add_song(song);
                }
            }
            None => {
                let id = VertexId(self.vertices.len());
                self.index.insert(artist.name.clone(), id);
                self.vertices.push(Vertex {
                    artist,
                    edges: Vec::new(),
                });
            }
        }
    }

    fn rebuild_edges(&mut self) {
        for vertex in &mut self.vertices {
            vertex.edges.clear();
        }

        // song title -> vertices that recorded it, ascending by id
        let mut by_song: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            for song in &vertex.artist.songs {
                by_song.entry(song.as_str()).or_default().push(i);
            }
        }
        let song_sets: Vec<HashSet<&str>> = self
            .vertices
            .iter()
            .map(|v| v.artist.songs.iter().map(String::as_str).collect())
            .collect();

        let mut pairs: Vec<(usize, usize, String)> = Vec::new();
        for (i, vertex) in self.vertices.iter().enumerate() {
            let partners: BTreeSet<usize> = vertex
                .artist
                .songs
                .iter()
                .filter_map(|song| by_song.get(song.as_str()))
                .flatten()
                .copied()
                .filter(|&j| j > i)
                .collect();

            for j in partners {
                let label = vertex
                    .artist
                    .songs
                    .iter()
                    .find(|song| song_sets[j].contains(song.as_str()));
                if let Some(song) = label {
                    pairs.push((i, j, song.clone()));
                }
            }
        }

        self.edge_count = pairs.len();
        for (i, j, song) in pairs {
            self.vertices[i].edges.push(Edge {
                to: VertexId(j),
                song: song.clone(),
            });
            self.vertices[j].edges.push(Edge {
                to: VertexId(i),
                song,
            });
        }
    }

    // -------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------

    /// Number of artists.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether `name` is an artist in the graph (exact match).
    pub fn is_vertex(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolve an artist name to its vertex.
    pub fn vertex_id(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    /// The artist stored at `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this graph.
    pub fn artist(&self, id: VertexId) -> &Artist {
        &self.vertices[id.0].artist
    }

    pub fn name(&self, id: VertexId) -> &str {
        &self.vertices[id.0].artist.name
    }

    /// Neighbors of `id` in stored order.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices[id.0].edges.iter().map(|e| e.to)
    }

    /// The `i`-th neighbor of `id` in stored order.
    pub fn neighbor_at(&self, id: VertexId, i: usize) -> Option<VertexId> {
        self.vertices[id.0].edges.get(i).map(|e| e.to)
    }

    /// Song labelling the edge between `a` and `b`, if they collaborated.
    pub fn edge_label(&self, a: VertexId, b: VertexId) -> Option<&str> {
        self.vertices[a.0]
            .edges
            .iter()
            .find(|e| e.to == b)
            .map(|e| e.song.as_str())
    }

    /// All vertex ids in load order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn stats(&self) -> GraphStats {
        let songs: HashSet<&str> = self
            .vertices
            .iter()
            .flat_map(|v| v.artist.songs.iter().map(String::as_str))
            .collect();
        GraphStats {
            artists: self.vertices.len(),
            collaborations: self.edge_count,
            songs: songs.len(),
        }
    }

    // -------------------------------------------------------------------
    // Dump
    // -------------------------------------------------------------------

    /// Write every artist followed by its collaborations.
    pub fn write_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for vertex in &self.vertices {
            writeln!(out, "{}", vertex.artist.name)?;
            for edge in &vertex.edges {
                writeln!(
                    out,
                    "\"{}\" collaborated with \"{}\" in \"{}\".",
                    vertex.artist.name,
                    self.name(edge.to),
                    edge.song
                )?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn names(graph: &CollabGraph, ids: impl Iterator<Item = VertexId>) -> Vec<String> {
        ids.map(|id| graph.name(id).to_string()).collect()
    }

    #[test]
    fn shared_song_creates_undirected_edge() {
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["X"]),
            Artist::with_songs("B", ["X", "Y"]),
            Artist::with_songs("C", ["Y"]),
        ]);
        let a = graph.vertex_id("A").unwrap();
        let b = graph.vertex_id("B").unwrap();
        let c = graph.vertex_id("C").unwrap();

        assert_eq!(graph.edge_label(a, b), Some("X"));
        assert_eq!(graph.edge_label(b, a), Some("X"));
        assert_eq!(graph.edge_label(b, c), Some("Y"));
        assert_eq!(graph.edge_label(a, c), None);
        assert_eq!(graph.stats().collaborations, 2);
    }

    #[test]
    fn neighbor_order_follows_pair_order() {
        // Pairs in order: (A,B) (A,D) (B,C) (B,D) (C,D)
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["s1", "s2"]),
            Artist::with_songs("B", ["s1", "s3", "s4"]),
            Artist::with_songs("C", ["s3", "s5"]),
            Artist::with_songs("D", ["s2", "s4", "s5"]),
        ]);
        let b = graph.vertex_id("B").unwrap();
        let d = graph.vertex_id("D").unwrap();

        assert_eq!(names(&graph, graph.neighbors(b)), vec!["A", "C", "D"]);
        assert_eq!(names(&graph, graph.neighbors(d)), vec!["A", "B", "C"]);
    }

    #[test]
    fn edge_label_is_first_shared_song_of_earlier_artist() {
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["Late", "Early"]),
            Artist::with_songs("B", ["Early", "Late"]),
        ]);
        let a = graph.vertex_id("A").unwrap();
        let b = graph.vertex_id("B").unwrap();
        assert_eq!(graph.edge_label(a, b), Some("Late"));
        assert_eq!(graph.edge_label(b, a), Some("Late"));
        assert_eq!(graph.neighbors(a).count(), 1);
    }

    #[test]
    fn names_are_exact_match() {
        let graph = CollabGraph::from_artists([Artist::with_songs("The Weeknd", ["Starboy"])]);
        assert!(graph.is_vertex("The Weeknd"));
        assert!(!graph.is_vertex("the weeknd"));
        assert!(!graph.is_vertex("The Weeknd "));
    }

    #[test]
    fn repeated_artist_records_merge() {
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["X"]),
            Artist::with_songs("B", ["Y"]),
            Artist::with_songs("A", ["Y"]),
        ]);
        assert_eq!(graph.len(), 2);
        let a = graph.vertex_id("A").unwrap();
        assert_eq!(graph.artist(a).songs, vec!["X", "Y"]);
        assert_eq!(graph.edge_label(a, graph.vertex_id("B").unwrap()), Some("Y"));
    }

    #[test]
    fn stats_count_distinct_songs() {
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["X", "Z"]),
            Artist::with_songs("B", ["X"]),
            Artist::new("C"),
        ]);
        assert_eq!(
            graph.stats(),
            GraphStats {
                artists: 3,
                collaborations: 1,
                songs: 2,
            }
        );
    }

    #[test]
    fn dump_lists_each_artist_and_collaborations() {
        let graph = CollabGraph::from_artists([
            Artist::with_songs("A", ["X"]),
            Artist::with_songs("B", ["X"]),
            Artist::new("C"),
        ]);
        let mut out = Vec::new();
        graph.write_dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "A\n\"A\" collaborated with \"B\" in \"X\".\n\n\
             B\n\"B\" collaborated with \"A\" in \"X\".\n\n\
             C\n\n"
        );
    }

    #[test]
    fn empty_graph() {
        let graph = CollabGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.vertex_ids().count(), 0);
        assert_eq!(graph.vertex_id("anyone"), None);
    }
}
