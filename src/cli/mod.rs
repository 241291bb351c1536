//! Command-line interface.
//!
//! ```text
//! sixdegrees <DATA_FILE> [COMMAND_FILE] [OUTPUT_FILE] [--config PATH] [--stats]
//! ```
//!
//! Commands come from stdin when no command file is given; results go to
//! stdout when no output file is given.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::config::SixDegreesConfig;
use crate::dataset::load_dataset;
use crate::error::{Result, SixDegreesError};
use crate::graph::CollabGraph;
use crate::session::{Session, SessionOptions};

/// Find collaboration paths between artists.
#[derive(Debug, Parser)]
#[command(name = "sixdegrees", version, about)]
pub struct Cli {
    /// Artist/song dataset.
    pub data_file: PathBuf,

    /// File of commands to run instead of reading stdin.
    pub command_file: Option<PathBuf>,

    /// File to write results to instead of stdout.
    pub output_file: Option<PathBuf>,

    /// YAML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print graph statistics as JSON to stderr after loading.
    #[arg(long)]
    pub stats: bool,
}

/// Load the dataset and run the command loop.
pub fn run(cli: &Cli, config: &SixDegreesConfig) -> Result<()> {
    let artists = load_dataset(&cli.data_file, &config.dataset.terminator)?;
    let graph = CollabGraph::from_artists(artists);

    if cli.stats {
        let stats = serde_json::to_string_pretty(&graph.stats())
            .map_err(|e| SixDegreesError::Other(format!("cannot encode stats: {e}")))?;
        eprintln!("{stats}");
    }

    let out: Box<dyn Write> = match &cli.output_file {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|source| {
            SixDegreesError::Open {
                path: path.clone(),
                source,
            }
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut session = Session::new(&graph, out, SessionOptions::from(config));
    match &cli.command_file {
        Some(path) => {
            let file = File::open(path).map_err(|source| SixDegreesError::Open {
                path: path.clone(),
                source,
            })?;
            session.run(BufReader::new(file))
        }
        None => session.run(io::stdin().lock()),
    }
}
