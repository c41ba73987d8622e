//! classdoc: generate markdown class references from engine doc XML.
//!
//! `classdoc 'doc_classes/*.xml' docs/classes` writes one page per class
//! plus a `README.md` index, replacing any markdown already in the target.
//!
//! Log verbosity follows `RUST_LOG` (default: `warn`).

mod anchor;
mod batch;
mod markup;
mod model;
mod parser;
mod registry;
mod render;

use anyhow::Result;
use clap::Parser;
use log::debug;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "classdoc",
    version,
    about = "Generate markdown documentation from class reference XML files"
)]
struct Cli {
    /// Source files, as a glob pattern (e.g. 'doc_classes/*.xml')
    sources: String,

    /// Output directory; existing .md files in it are deleted
    target: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    debug!("sources: {}, target: {}", cli.sources, cli.target.display());

    batch::run(&cli.sources, &cli.target)
}
