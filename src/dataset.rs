//! Artist/song record reader.
//!
//! The dataset is a sequence of blocks:
//!
//! ```text
//! Artist name
//! Song one
//! Song two
//! *
//! ```
//!
//! Each block is a name line, any number of song lines, and a terminator
//! line. Lines are taken verbatim apart from a trailing `\r`; bytes that are
//! not valid UTF-8 are replaced with U+FFFD rather than rejected.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SixDegreesError};
use crate::types::Artist;

/// Default block terminator.
pub const DEFAULT_TERMINATOR: &str = "*";

/// Parse artist blocks from `reader`.
///
/// Blank lines between blocks are skipped. A block that hits end of input
/// before its terminator is a [`SixDegreesError::Malformed`] error.
pub fn read_artists<R: BufRead>(mut reader: R, terminator: &str) -> Result<Vec<Artist>> {
    let mut artists = Vec::new();
    let mut current: Option<(Artist, usize)> = None;

    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw);
        let line = line.as_ref();

        match current.as_mut() {
            None if line.is_empty() => {}
            None => current = Some((Artist::new(line), line_no)),
            Some(_) if line == terminator => {
                if let Some((artist, _)) = current.take() {
                    artists.push(artist);
                }
            }
            Some((artist, _)) => artist.add_song(line),
        }
    }

    if let Some((artist, start)) = current {
        return Err(SixDegreesError::Malformed {
            line: start,
            message: format!(
                "record for \"{}\" is missing its \"{}\" terminator",
                artist.name, terminator
            ),
        });
    }

    tracing::debug!(artists = artists.len(), "dataset parsed");
    Ok(artists)
}

/// Open and parse a dataset file.
pub fn load_dataset(path: &Path, terminator: &str) -> Result<Vec<Artist>> {
    let file = File::open(path).map_err(|source| SixDegreesError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_artists(BufReader::new(file), terminator)
}
