//! CLI entry point for the line boil animation tool

use clap::Parser;
use lineboil::io::cli::{Cli, FileProcessor};

fn main() -> lineboil::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
