//! Core domain types for SixDegrees.
//!
//! Artists are identified by their exact name; songs are plain titles that
//! become edge labels once the graph is built.

// ---------------------------------------------------------------------------
// Artist
// ---------------------------------------------------------------------------

/// An artist record as read from the dataset.
///
/// Identity is the name, compared byte-for-byte: no trimming, no case
/// folding. Songs keep their input order, which decides the edge label when
/// two artists share more than one song.
#[derive(Debug, Clone)]
pub struct Artist {
    pub name: String,
    pub songs: Vec<String>,
}

impl Artist {
    /// Create an artist with no songs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            songs: Vec::new(),
        }
    }

    /// Create an artist with the given songs, dropping repeated titles.
    pub fn with_songs<I, S>(name: impl Into<String>, songs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut artist = Self::new(name);
        for song in songs {
            artist.add_song(song);
        }
        artist
    }

    /// Append a song unless the artist already has it.
    pub fn add_song(&mut self, song: impl Into<String>) {
        let song = song.into();
        if !self.has_song(&song) {
            self.songs.push(song);
        }
    }

    pub fn has_song(&self, title: &str) -> bool {
        self.songs.iter().any(|s| s == title)
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Artist {}

impl std::hash::Hash for Artist {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Hop / CollabPath
// ---------------------------------------------------------------------------

/// One step of a collaboration path: `from` worked with `to` on `song`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub from: String,
    pub to: String,
    pub song: String,
}

/// A reconstructed path, ordered from source to destination.
///
/// A path with no hops is the self-path (`source == destination`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabPath {
    pub source: String,
    pub hops: Vec<Hop>,
}

impl CollabPath {
    /// Number of collaborations on the path.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// The last artist on the path.
    pub fn destination(&self) -> &str {
        self.hops.last().map_or(self.source.as_str(), |h| h.to.as_str())
    }

    /// All artists on the path, source first.
    pub fn artists(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.source.as_str()).chain(self.hops.iter().map(|h| h.to.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.artists().any(|a| a == name)
    }
}
