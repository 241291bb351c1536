//! SixDegrees: collaboration path queries over an artist/song graph.
//!
//! Loads artist records, links artists that share a song, and answers
//! "how are these two artists connected?" with BFS, DFS, or BFS that
//! avoids a set of artists.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod observability;
pub mod query;
pub mod session;
pub mod types;
