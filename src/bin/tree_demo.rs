//! Builds a tree from the command line, runs lookups, and prints it sideways.
//!
//! With no values the sample sequence is used. Set `RUST_LOG=trace` to see
//! every rotation.

use std::io::{self, Write};

use anyhow::Result;
use balanced_search_tree::{AvlTree, Signed};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const SAMPLE: [f64; 11] = [
    5.0, 3.0, 1.0, 7.0, 10.0, 30.0, 4.0, 2.0, 1000.0, 3.4, 41000.0,
];

#[derive(Parser)]
#[command(name = "tree-demo")]
#[command(about = "Insert numbers into an AVL tree and inspect it", long_about = None)]
struct Cli {
    /// Values to insert, in order
    #[arg(allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Values to look up after inserting
    #[arg(short, long, default_values_t = [3.0, 10.0])]
    probe: Vec<f64>,

    /// Skip the tree rendering
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let values = if cli.values.is_empty() {
        SAMPLE.to_vec()
    } else {
        cli.values
    };

    let mut tree = AvlTree::with_comparator(Signed(|a: &f64, b: &f64| a - b));
    for value in values {
        if !tree.add(value) {
            tracing::info!(value, "skipped duplicate");
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for value in &cli.probe {
        writeln!(out, "contains({value}): {}", tree.contains(value))?;
    }
    if !cli.quiet {
        tree.write_to(&mut out)?;
    }
    writeln!(out, "SIZE: {}", tree.size())?;

    tree.validate()?;
    Ok(())
}
