//! docsplice CLI — documentation build helper.
//!
//! Splices annotated code samples into Markdown docs, converts LaTeX papers
//! to HTML, and publishes generated API reference trees.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
