//! CLI entry point for the image partitioning tool

use clap::Parser;
use tilesplit::io::cli::{Cli, FileProcessor};
use tilesplit::io::logging::init_logging;

fn main() -> tilesplit::Result<()> {
    let cli = Cli::parse();
    let log_config = cli.log_config();
    let _logging_guard = init_logging(&log_config)?;

    let mut processor = FileProcessor::with_logger(cli, log_config.logger());
    processor.process()?;
    Ok(())
}
