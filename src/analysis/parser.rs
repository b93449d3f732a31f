//! Parser for analyzer explain responses.
//!
//! The analyzer returns one token view per analysis stage under
//! `detail.tokenfilters[*]`. [`LatticeParser`] picks the stage whose `name`
//! matches exactly and turns its `tokens` into [`TokenEdge`]s.
//!
//! ```json
//! {
//!   "detail": {
//!     "tokenfilters": [
//!       { "name": "synonym_filter", "tokens": [
//!           { "token": "삼성", "type": "word", "position": 0,
//!             "positionLength": 1, "start_offset": 0, "end_offset": 2 }
//!       ]}
//!     ]
//!   }
//! }
//! ```
//!
//! Missing structure (`detail`, `tokenfilters`, the stage, or `tokens`) yields
//! an empty lattice. Only undecodable JSON or an incomplete token object is an
//! error.
//!
//! # Examples
//!
//! ```
//! use query_lattice::analysis::parser::LatticeParser;
//!
//! let parser = LatticeParser::new();
//! let lattice = parser.parse_str(r#"{"tokens": []}"#, "삼성전자", "synonym_filter").unwrap();
//!
//! assert!(lattice.edges().is_empty());
//! assert_eq!(lattice.original_query(), "삼성전자");
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::analysis::lattice::TokenLattice;
use crate::analysis::token::{TokenEdge, TokenKind};
use crate::error::{LatticeError, Result};

/// One token object from a stage's `tokens` array.
#[derive(Debug, Deserialize)]
struct RawToken {
    token: String,
    #[serde(rename = "type")]
    token_type: Option<String>,
    position: usize,
    #[serde(rename = "positionLength")]
    position_length: Option<usize>,
    attributes: Option<RawAttributes>,
    start_offset: usize,
    end_offset: usize,
}

#[derive(Debug, Deserialize)]
struct RawAttributes {
    #[serde(rename = "positionLength")]
    position_length: Option<usize>,
}

impl RawToken {
    fn into_edge(self) -> Result<TokenEdge> {
        let length = self
            .position_length
            .or_else(|| self.attributes.as_ref().and_then(|a| a.position_length))
            .unwrap_or(1);

        TokenEdge::with_offsets(
            self.token,
            TokenKind::from_analyzer_type(self.token_type.as_deref()),
            self.position,
            length,
            self.start_offset,
            self.end_offset,
        )
    }
}

/// Converts analyzer responses into token lattices.
///
/// The parser carries configuration only and no decoder state, so a single
/// instance can be shared freely across threads.
#[derive(Clone, Debug, Default)]
pub struct LatticeParser {
    max_paths: Option<usize>,
}

impl LatticeParser {
    /// Create a parser with unbounded path enumeration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of paths enumerated for each parsed lattice.
    pub fn with_max_paths(mut self, limit: Option<usize>) -> Self {
        self.max_paths = limit;
        self
    }

    /// Parse `raw` and build the lattice for `target_stage`, with its paths
    /// already enumerated.
    pub fn parse(
        &self,
        raw: &[u8],
        original_query: &str,
        target_stage: &str,
    ) -> Result<TokenLattice> {
        let document: Value = serde_json::from_slice(raw)
            .map_err(|e| LatticeError::parse("analyzer response is not valid JSON", e))?;
        self.parse_value(&document, original_query, target_stage)
    }

    /// Same as [`parse`](Self::parse) for a string response.
    pub fn parse_str(
        &self,
        raw: &str,
        original_query: &str,
        target_stage: &str,
    ) -> Result<TokenLattice> {
        self.parse(raw.as_bytes(), original_query, target_stage)
    }

    /// Extract the edges of `target_stage` without building a lattice.
    ///
    /// Returns an empty list for every graceful-empty case.
    pub fn parse_edges(&self, raw: &[u8], target_stage: &str) -> Result<Vec<TokenEdge>> {
        let document: Value = serde_json::from_slice(raw)
            .map_err(|e| LatticeError::parse("analyzer response is not valid JSON", e))?;
        self.edges_from_value(&document, target_stage)
    }

    /// Build the lattice for `target_stage` from an already decoded response.
    pub fn parse_value(
        &self,
        document: &Value,
        original_query: &str,
        target_stage: &str,
    ) -> Result<TokenLattice> {
        let edges = self.edges_from_value(document, target_stage)?;
        let mut lattice =
            TokenLattice::new(original_query, edges).with_max_paths(self.max_paths);
        lattice.generate_paths();
        Ok(lattice)
    }

    /// Extract the edges of `target_stage` from a decoded response.
    pub fn edges_from_value(&self, document: &Value, target_stage: &str) -> Result<Vec<TokenEdge>> {
        let Some(tokens) = Self::stage_tokens(document, target_stage) else {
            return Ok(Vec::new());
        };

        let mut edges = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let raw_token = RawToken::deserialize(token).map_err(|e| {
                LatticeError::parse(
                    format!("token {index} of stage '{target_stage}' is incomplete"),
                    e,
                )
            })?;
            edges.push(raw_token.into_edge()?);
        }

        debug!(stage = target_stage, edges = edges.len(), "parsed stage tokens");
        Ok(edges)
    }

    /// Locate `detail.tokenfilters[name == stage].tokens`.
    fn stage_tokens<'a>(document: &'a Value, target_stage: &str) -> Option<&'a Vec<Value>> {
        let Some(detail) = document.get("detail") else {
            debug!("analyzer response has no detail");
            return None;
        };
        let Some(filters) = detail.get("tokenfilters").and_then(Value::as_array) else {
            debug!("analyzer response has no tokenfilters");
            return None;
        };
        let Some(stage) = filters
            .iter()
            .find(|f| f.get("name").and_then(Value::as_str) == Some(target_stage))
        else {
            debug!(stage = target_stage, "no tokenfilter matches the target stage");
            return None;
        };
        let tokens = stage.get("tokens").and_then(Value::as_array);
        if tokens.is_none() {
            debug!(stage = target_stage, "target stage has no tokens");
        }
        tokens
    }
}
