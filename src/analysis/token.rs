//! Token edges: the candidate tokens that make up a lattice.
//!
//! An analyzer emits one token object per candidate. Each one becomes a
//! [`TokenEdge`] spanning `[start_pos, start_pos + length)` in position space.
//!
//! ```text
//! Input: "갤럭시북"
//!
//! Token Graph:
//!   Position 0: "갤럭시"   (pos_len=1)
//!   Position 0: "갤럭시북" (pos_len=2)  ← compound, spans 2
//!   Position 1: "북"       (pos_len=1)
//! ```
//!
//! # Examples
//!
//! ```
//! use query_lattice::analysis::token::{TokenEdge, TokenKind};
//!
//! let edge = TokenEdge::new("갤럭시북", TokenKind::Word, 0, 2).unwrap();
//! assert_eq!(edge.end_pos(), 2);
//! assert!(edge.is_multi_position());
//!
//! // Zero-length edges are rejected.
//! assert!(TokenEdge::new("x", TokenKind::Word, 0, 0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LatticeError, Result};

/// Classification of a token as reported by the analyzer's `type` field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Ordinary morpheme or compound (`"word"`, or no type at all)
    #[default]
    Word,
    /// Injected by a synonym filter (`"SYNONYM"`)
    Synonym,
    /// Supplementary indexing term (`"additional"`); never part of a path
    Additional,
    /// Any other analyzer type, kept verbatim
    Other(String),
}

impl TokenKind {
    /// Map the analyzer's `type` literal to a kind.
    ///
    /// Matching is exact: `"synonym"` in lower case is `Other`.
    pub fn from_analyzer_type(value: Option<&str>) -> Self {
        match value {
            None | Some("word") => TokenKind::Word,
            Some("SYNONYM") => TokenKind::Synonym,
            Some("additional") => TokenKind::Additional,
            Some(other) => TokenKind::Other(other.to_string()),
        }
    }

    /// The analyzer literal for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Synonym => "SYNONYM",
            TokenKind::Additional => "additional",
            TokenKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TokenKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(TokenKind::from_analyzer_type(value.as_deref()))
    }
}

/// One candidate token spanning a contiguous range of positions.
///
/// Edges are validated on construction and immutable afterwards; all fields
/// are read through getters.
///
/// # Fields
///
/// - `surface` - The token text
/// - `kind` - Analyzer classification
/// - `start_pos` / `length` - Position range `[start_pos, start_pos + length)`
/// - `start_offset` / `end_offset` - Character offsets in the original query
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TokenEdge {
    surface: String,
    kind: TokenKind,
    start_pos: usize,
    length: usize,
    start_offset: usize,
    end_offset: usize,
}

impl TokenEdge {
    /// Create an edge without character offsets.
    pub fn new<S: Into<String>>(
        surface: S,
        kind: TokenKind,
        start_pos: usize,
        length: usize,
    ) -> Result<Self> {
        Self::with_offsets(surface, kind, start_pos, length, 0, 0)
    }

    /// Create an edge with character offsets into the original query.
    pub fn with_offsets<S: Into<String>>(
        surface: S,
        kind: TokenKind,
        start_pos: usize,
        length: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Result<Self> {
        let surface = surface.into();
        if length < 1 {
            return Err(LatticeError::construction(format!(
                "token '{surface}' at position {start_pos} has position length {length}, expected at least 1"
            )));
        }
        if start_pos.checked_add(length).is_none() {
            return Err(LatticeError::construction(format!(
                "token '{surface}' at position {start_pos} with length {length} overflows the position range"
            )));
        }
        if end_offset < start_offset {
            return Err(LatticeError::construction(format!(
                "token '{surface}' has end offset {end_offset} before start offset {start_offset}"
            )));
        }

        Ok(TokenEdge {
            surface,
            kind,
            start_pos,
            length,
            start_offset,
            end_offset,
        })
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn start_pos(&self) -> usize {
        self.start_pos
    }

    /// Number of positions this edge spans (always at least 1).
    pub fn length(&self) -> usize {
        self.length
    }

    /// First position after this edge.
    pub fn end_pos(&self) -> usize {
        self.start_pos + self.length
    }

    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn is_synonym(&self) -> bool {
        self.kind == TokenKind::Synonym
    }

    pub fn is_additional(&self) -> bool {
        self.kind == TokenKind::Additional
    }

    /// Whether this edge is a compound spanning more than one position.
    pub fn is_multi_position(&self) -> bool {
        self.length > 1
    }

    /// Slice of `query` covered by this edge's character offsets.
    ///
    /// Offsets past the end of the query are clamped, so a stale or
    /// mismatched query never panics.
    pub fn covered_text(&self, query: &str) -> String {
        query
            .chars()
            .skip(self.start_offset)
            .take(self.end_offset - self.start_offset)
            .collect()
    }
}

impl fmt::Display for TokenEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.surface)
    }
}
