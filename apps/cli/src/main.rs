//! docbinder CLI — bind a Markdown documentation tree into one document.
//!
//! Produces a single numbered Markdown file, or renders the tree to HTML or
//! PDF through `pandoc` and `wkhtmltopdf`.

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
