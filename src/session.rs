//! Line-oriented command loop.
//!
//! Reads commands (`print`, `bfs`, `dfs`, `not`, `quit`) and their argument
//! lines from one stream and writes results to another. One command runs
//! to completion before the next line is read.

use std::io::{BufRead, Write};

use crate::error::Result;
use crate::graph::CollabGraph;
use crate::query::{Query, QueryEngine};

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A command keyword, parsed from one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Print,
    Bfs,
    Dfs,
    Not,
    Quit,
    /// Anything else, kept verbatim for the diagnostic.
    Unknown(String),
}

impl Command {
    /// Exact-match parse; no trimming or case folding.
    pub fn parse(line: &str) -> Self {
        match line {
            "print" => Self::Print,
            "bfs" => Self::Bfs,
            "dfs" => Self::Dfs,
            "not" => Self::Not,
            "quit" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionOptions
// ---------------------------------------------------------------------------

/// Delimiters used by the command stream and the path renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Ends a `not` exclusion list.
    pub terminator: String,
    /// Printed after the last hop of a path.
    pub sentinel: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            terminator: crate::dataset::DEFAULT_TERMINATOR.to_string(),
            sentinel: crate::query::DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl From<&crate::config::SixDegreesConfig> for SessionOptions {
    fn from(config: &crate::config::SixDegreesConfig) -> Self {
        Self {
            terminator: config.dataset.terminator.clone(),
            sentinel: config.output.sentinel.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Command loop bound to a graph and an output sink.
pub struct Session<'g, W: Write> {
    engine: QueryEngine<'g>,
    out: W,
    options: SessionOptions,
}

impl<'g, W: Write> Session<'g, W> {
    pub fn new(graph: &'g CollabGraph, out: W, options: SessionOptions) -> Self {
        Self {
            engine: QueryEngine::new(graph),
            out,
            options,
        }
    }

    /// Consume the session and hand back the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run commands from `input` until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        let mut lines = LineReader::new(input);

        while let Some(line) = lines.next_line()? {
            let command = Command::parse(&line);
            tracing::debug!(?command, "command read");

            match command {
                Command::Quit => break,
                Command::Print => self.engine.graph().write_dump(&mut self.out)?,
                Command::Bfs => {
                    let (from, to) = (lines.arg()?, lines.arg()?);
                    self.run_query(Query::bfs(from, to))?;
                }
                Command::Dfs => {
                    let (from, to) = (lines.arg()?, lines.arg()?);
                    self.run_query(Query::dfs(from, to))?;
                }
                Command::Not => {
                    let (from, to) = (lines.arg()?, lines.arg()?);
                    let excluded = lines.list(&self.options.terminator)?;
                    self.run_query(Query::excluding(from, to, excluded))?;
                }
                Command::Unknown(token) => {
                    writeln!(self.out, "{token} is not a command. Please try again.")?;
                }
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn run_query(&mut self, query: Query) -> Result<()> {
        let outcome = self.engine.run(&query);
        outcome.write_to(&mut self.out, &self.options.sentinel)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LineReader
// ---------------------------------------------------------------------------

/// Line source that strips `\r\n` endings.
///
/// Lines are read as raw bytes; invalid UTF-8 is replaced, never an error.
struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let line = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Ok(Some(String::from_utf8_lossy(line).into_owned()))
    }

    /// An argument line; end of input reads as an empty name.
    fn arg(&mut self) -> Result<String> {
        Ok(self.next_line()?.unwrap_or_default())
    }

    /// Lines up to `terminator` or end of input, whichever comes first.
    fn list(&mut self, terminator: &str) -> Result<Vec<String>> {
        let mut items = Vec::new();
        while let Some(line) = self.next_line()? {
            if line == terminator {
                break;
            }
            items.push(line);
        }
        Ok(items)
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
    use std::io::Cursor;
    use test_case::test_case;

    fn chain() -> CollabGraph {
        CollabGraph::from_artists([
            Artist::with_songs("A", ["X"]),
            Artist::with_songs("B", ["X", "Y"]),
            Artist::with_songs("C", ["Y"]),
        ])
    }

    fn run(graph: &CollabGraph, commands: &str) -> String {
        let mut session = Session::new(graph, Vec::new(), SessionOptions::default());
        session.run(Cursor::new(commands)).unwrap();
        String::from_utf8(session.into_inner()).unwrap()
    }

    #[test_case("print", Command::Print ; "print")]
    #[test_case("bfs", Command::Bfs ; "bfs")]
    #[test_case("dfs", Command::Dfs ; "dfs")]
    #[test_case("not", Command::Not ; "not")]
    #[test_case("quit", Command::Quit ; "quit")]
    #[test_case("BFS", Command::Unknown("BFS".into()) ; "case sensitive")]
    #[test_case(" bfs", Command::Unknown(" bfs".into()) ; "no trimming")]
    #[test_case("", Command::Unknown(String::new()) ; "empty line")]
    fn command_parse(line: &str, expected: Command) {
        assert_eq!(Command::parse(line), expected);
    }

    #[test]
    fn bfs_command_prints_path() {
        let out = run(&chain(), "bfs\nA\nC\nquit\n");
        assert_eq!(
            out,
            "\"A\" collaborated with \"B\" in \"X\".\n\
             \"B\" collaborated with \"C\" in \"Y\".\n\
             ***\n"
        );
    }

    #[test]
    fn not_command_reads_exclusion_list() {
        let out = run(&chain(), "not\nA\nC\nB\n*\nbfs\nA\nB\n");
        assert_eq!(
            out,
            "A path does not exist between \"A\" and \"C\".\n\
             \"A\" collaborated with \"B\" in \"X\".\n\
             ***\n"
        );
    }

    #[test]
    fn not_command_reports_every_bad_name() {
        let out = run(&chain(), "not\nZ\nC\nQ\nB\n*\n");
        assert_eq!(
            out,
            "\"Z\" was not found in the dataset :(\n\
             \"Q\" was not found in the dataset :(\n"
        );
    }

    #[test]
    fn unknown_command_continues_loop() {
        let out = run(&chain(), "hello\nbfs\nA\nA\n");
        assert_eq!(out, "hello is not a command. Please try again.\n***\n");
    }

    #[test]
    fn quit_stops_before_remaining_commands() {
        let out = run(&chain(), "quit\nbfs\nA\nC\n");
        assert_eq!(out, "");
    }

    #[test]
    fn print_dumps_graph() {
        let out = run(&chain(), "print\n");
        assert!(out.starts_with("A\n\"A\" collaborated with \"B\" in \"X\".\n"));
        assert!(out.contains("C\n\"C\" collaborated with \"B\" in \"Y\".\n"));
    }

    #[test]
    fn truncated_arguments_read_as_empty_names() {
        let out = run(&chain(), "dfs\nA");
        assert_eq!(out, "\"\" was not found in the dataset :(\n");
    }

    #[test]
    fn exclusion_list_may_end_at_eof() {
        let out = run(&chain(), "not\nA\nC\nB");
        assert_eq!(out, "A path does not exist between \"A\" and \"C\".\n");
    }

    #[test]
    fn invalid_utf8_command_does_not_end_session() {
        let graph = chain();
        let mut session = Session::new(&graph, Vec::new(), SessionOptions::default());
        session
            .run(Cursor::new(&b"caf\xe9\nbfs\nA\nB\n"[..]))
            .unwrap();
        let out = String::from_utf8(session.into_inner()).unwrap();
        assert_eq!(
            out,
            "caf\u{FFFD} is not a command. Please try again.\n\
             \"A\" collaborated with \"B\" in \"X\".\n\
             ***\n"
        );
    }

    #[test]
    fn invalid_utf8_name_is_reported_not_found() {
        let graph = chain();
        let mut session = Session::new(&graph, Vec::new(), SessionOptions::default());
        session
            .run(Cursor::new(&b"bfs\nA\nZo\xeb\nbfs\nA\nC\n"[..]))
            .unwrap();
        let out = String::from_utf8(session.into_inner()).unwrap();
        assert!(out.starts_with("\"Zo\u{FFFD}\" was not found in the dataset :(\n"));
        assert!(out.ends_with("\"B\" collaborated with \"C\" in \"Y\".\n***\n"));
    }

    #[test]
    fn crlf_input_is_accepted() {
        let out = run(&chain(), "bfs\r\nA\r\nB\r\n");
        assert_eq!(out, "\"A\" collaborated with \"B\" in \"X\".\n***\n");
    }

    #[test]
    fn custom_delimiters() {
        let graph = chain();
        let options = SessionOptions {
            terminator: "END".into(),
            sentinel: "--".into(),
        };
        let mut session = Session::new(&graph, Vec::new(), options);
        session
            .run(Cursor::new("not\nA\nB\nC\nEND\nbfs\nB\nB\n"))
            .unwrap();
        let out = String::from_utf8(session.into_inner()).unwrap();
        assert_eq!(out, "\"A\" collaborated with \"B\" in \"X\".\n--\n--\n");
    }
}
