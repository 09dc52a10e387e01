//! `docdeps`: list the transitive reference dependencies of a document.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
