//! `dpe-render`: render a property editor document as a view outline.
//!
//! Usage:
//!   dpe-render <document.json> [--patch <patch.json>]... [--config <options.json>]
//!
//! Patches are JSON arrays of `add`/`remove`/`replace` operations, applied in
//! order. Set `RUST_LOG=debug` to trace how each operation reaches the view.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dpe::cli::render;
use dpe::EditorOptions;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dpe-render")]
#[command(version, about = "Render a property editor document as a view outline", long_about = None)]
struct Args {
    /// Document file: a JSON array of Row nodes
    document: PathBuf,

    /// Patch file to apply after the initial render (repeatable)
    #[arg(short, long = "patch")]
    patches: Vec<PathBuf>,

    /// Editor options file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let options = match &args.config {
        Some(path) => EditorOptions::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EditorOptions::default(),
    };

    let document = std::fs::read_to_string(&args.document)
        .with_context(|| format!("reading {}", args.document.display()))?;
    let patches = args
        .patches
        .iter()
        .map(|path| std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let outline = render(&document, &patches, options)?;
    print!("{outline}");
    Ok(())
}
