//! query-lattice CLI binary.

use anyhow::Context;
use clap::Parser;
use query_lattice::cli::{args::*, commands::*};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments using clap
    let args = QueryLatticeArgs::parse();

    // RUST_LOG wins; otherwise the level follows -q / -v.
    let default_level = match args.verbosity() {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    execute_command(args).context("query-lattice command failed")
}
