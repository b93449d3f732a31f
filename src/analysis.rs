//! Token lattice analysis of analyzer explain output.
//!
//! # Components
//!
//! - [`token`] - Token edges and their kinds
//! - [`parser`] - Extraction of one stage's tokens from an analyzer response
//! - [`lattice`] - The token lattice and path enumeration
//! - [`diagram`] - Mermaid and Graphviz rendering
//! - [`report`] - Search and index view summaries
//! - [`service`] - Configured entry point, including batch analysis
//!
//! # Examples
//!
//! ```
//! use query_lattice::analysis::parser::LatticeParser;
//!
//! let response = r#"{"detail": {"tokenfilters": [{"name": "synonym_filter", "tokens": [
//!     {"token": "갤럭시", "position": 0, "start_offset": 0, "end_offset": 3},
//!     {"token": "갤럭시북", "position": 0, "positionLength": 2, "start_offset": 0, "end_offset": 4},
//!     {"token": "북", "position": 1, "start_offset": 3, "end_offset": 4}
//! ]}]}}"#;
//!
//! let lattice = LatticeParser::new()
//!     .parse_str(response, "갤럭시북", "synonym_filter")
//!     .unwrap();
//!
//! let paths: Vec<_> = lattice.paths().iter().map(|p| lattice.path_surfaces(p)).collect();
//! assert_eq!(paths, vec![vec!["갤럭시", "북"], vec!["갤럭시북"]]);
//! ```

pub mod diagram;
pub mod lattice;
pub mod parser;
pub mod report;
pub mod service;
pub mod token;
