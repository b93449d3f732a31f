//! Command line argument parsing for the query-lattice CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::diagram::DiagramFormat;

/// query-lattice - inspect how an analyzer segments a query
#[derive(Parser, Debug, Clone)]
#[command(name = "query-lattice")]
#[command(about = "Build token lattices from analyzer explain output and enumerate segmentations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct QueryLatticeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "QUERY_LATTICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl QueryLatticeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search view: tokens, synonyms, extracted terms and all segmentations
    Analyze(AnalyzeArgs),

    /// Index view: preprocessed tokens of the index stage
    Index(IndexArgs),

    /// Render the lattice of one stage as a diagram
    Diagram(DiagramArgs),

    /// Analyze a JSONL file of {"query", "response"} records in parallel
    Batch(BatchArgs),
}

/// Arguments for the search view
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Analyzer response file, or "-" for stdin
    #[arg(value_name = "RESPONSE_FILE")]
    pub response: PathBuf,

    /// The query the response was produced for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Stage to read instead of the configured search stage
    #[arg(short, long)]
    pub stage: Option<String>,

    /// Leave the diagram out of the report
    #[arg(long)]
    pub no_diagram: bool,
}

/// Arguments for the index view
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Analyzer response file, or "-" for stdin
    #[arg(value_name = "RESPONSE_FILE")]
    pub response: PathBuf,

    /// The query the response was produced for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Stage to read instead of the configured index stage
    #[arg(short, long)]
    pub stage: Option<String>,
}

/// Arguments for diagram rendering
#[derive(Parser, Debug, Clone)]
pub struct DiagramArgs {
    /// Analyzer response file, or "-" for stdin
    #[arg(value_name = "RESPONSE_FILE")]
    pub response: PathBuf,

    /// The query the response was produced for
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Stage to render (default: the configured search stage)
    #[arg(short, long)]
    pub stage: Option<String>,

    /// Diagram syntax (default: from configuration)
    #[arg(short = 'd', long = "diagram-format")]
    pub diagram_format: Option<DiagramFormatArg>,
}

/// Arguments for batch analysis
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// JSONL file with one {"query": ..., "response": {...}} object per line
    #[arg(value_name = "INPUT_FILE")]
    pub input: PathBuf,

    /// Stop at the first failed request instead of reporting it
    #[arg(long)]
    pub fail_fast: bool,
}

/// Diagram syntax choices on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramFormatArg {
    /// Mermaid flowchart
    Mermaid,
    /// Graphviz DOT
    Dot,
}

impl From<DiagramFormatArg> for DiagramFormat {
    fn from(arg: DiagramFormatArg) -> Self {
        match arg {
            DiagramFormatArg::Mermaid => DiagramFormat::Mermaid,
            DiagramFormatArg::Dot => DiagramFormat::Dot,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
