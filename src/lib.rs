//! # query-lattice
//!
//! Token lattice construction and path enumeration for search analyzer
//! explain output.
//!
//! ## Features
//!
//! - Parsing of one named analysis stage from an analyzer response
//! - Lattice of word, compound, synonym and additional tokens
//! - Exhaustive enumeration of complete query segmentations
//! - Search and index view reports, Mermaid and Graphviz diagrams
//! - Parallel batch analysis

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;

pub mod prelude {
    pub use crate::analysis::diagram::{DiagramFormat, DiagramRenderer};
    pub use crate::analysis::lattice::{Path, TokenLattice};
    pub use crate::analysis::parser::LatticeParser;
    pub use crate::analysis::report::{IndexAnalysis, QueryAnalysis};
    pub use crate::analysis::service::{AnalysisRequest, AnalysisService};
    pub use crate::analysis::token::{TokenEdge, TokenKind};
    pub use crate::config::AnalysisConfig;
    pub use crate::error::{LatticeError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
