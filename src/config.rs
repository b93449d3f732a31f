//! Configuration for lattice analysis.
//!
//! Every field has a default, so a configuration file only needs the values
//! it changes.
//!
//! # Examples
//!
//! ```
//! use query_lattice::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::default();
//! assert_eq!(config.search_stage, "synonym_filter");
//! assert_eq!(config.index_stage, "stopword_filter");
//!
//! let custom: AnalysisConfig =
//!     serde_json::from_str(r#"{"search_stage": "search_synonyms", "max_paths": 100}"#).unwrap();
//! assert_eq!(custom.search_stage, "search_synonyms");
//! assert_eq!(custom.index_stage, "stopword_filter");
//! assert_eq!(custom.max_paths, Some(100));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::diagram::DiagramFormat;
use crate::error::{LatticeError, Result};

/// Configuration for [`AnalysisService`](crate::analysis::service::AnalysisService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tokenfilter name whose output is the search view (synonym stage).
    pub search_stage: String,

    /// Tokenfilter name whose output is the index view (stopword stage).
    pub index_stage: String,

    /// Syntax used for rendered diagrams.
    pub diagram_format: DiagramFormat,

    /// Whether search-view reports include a diagram.
    pub include_diagram: bool,

    /// Maximum number of paths enumerated per query.
    /// If None, enumeration is unbounded.
    pub max_paths: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            search_stage: "synonym_filter".to_string(),
            index_stage: "stopword_filter".to_string(),
            diagram_format: DiagramFormat::Mermaid,
            include_diagram: true,
            max_paths: None,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: AnalysisConfig = serde_json::from_str(&content).map_err(|e| {
            LatticeError::config(format!(
                "invalid configuration file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that stage names are set and the path limit is usable.
    pub fn validate(&self) -> Result<()> {
        if self.search_stage.trim().is_empty() {
            return Err(LatticeError::config("search_stage must not be empty"));
        }
        if self.index_stage.trim().is_empty() {
            return Err(LatticeError::config("index_stage must not be empty"));
        }
        if self.max_paths == Some(0) {
            return Err(LatticeError::config("max_paths must be at least 1"));
        }
        Ok(())
    }

    pub fn with_search_stage<S: Into<String>>(mut self, stage: S) -> Self {
        self.search_stage = stage.into();
        self
    }

    pub fn with_index_stage<S: Into<String>>(mut self, stage: S) -> Self {
        self.index_stage = stage.into();
        self
    }

    pub fn with_max_paths(mut self, limit: Option<usize>) -> Self {
        self.max_paths = limit;
        self
    }
}
