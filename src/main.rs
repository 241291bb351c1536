use std::process::ExitCode;

use clap::Parser;

use sixdegrees::cli::{self, Cli};
use sixdegrees::config::load_config;
use sixdegrees::observability::init_logging;

fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sixdegrees: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging.filter);

    match cli::run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "sixdegrees failed");
            eprintln!("sixdegrees: {e}");
            ExitCode::FAILURE
        }
    }
}
