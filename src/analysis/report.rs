//! Human-facing summaries built from a lattice.
//!
//! [`QueryAnalysis`] is the search view: a flat token list, synonym
//! expansions, extracted compound and additional terms, every segmentation
//! path and optionally a diagram. [`IndexAnalysis`] is the index view: just
//! the preprocessed token surfaces, without path enumeration.

use serde::Serialize;

use crate::analysis::diagram::DiagramRenderer;
use crate::analysis::lattice::TokenLattice;
use crate::analysis::token::{TokenEdge, TokenKind};

/// One edge, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSummary {
    pub surface: String,
    pub kind: TokenKind,
    pub position: usize,
    pub length: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    /// The part of the original query this token was produced from.
    pub text: String,
}

impl TokenSummary {
    fn from_edge(edge: &TokenEdge, query: &str) -> Self {
        TokenSummary {
            surface: edge.surface().to_string(),
            kind: edge.kind().clone(),
            position: edge.start_pos(),
            length: edge.length(),
            start_offset: edge.start_offset(),
            end_offset: edge.end_offset(),
            text: edge.covered_text(query),
        }
    }
}

/// Synonyms injected over one position span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynonymExpansion {
    pub position: usize,
    pub length: usize,
    /// Original tokens at the same span, or the covered query text when the
    /// analyzer kept no original.
    pub source: String,
    pub synonyms: Vec<String>,
}

/// Search-view analysis of one query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnalysis {
    pub original_query: String,
    pub stage: String,
    pub tokens: Vec<TokenSummary>,
    pub synonyms: Vec<SynonymExpansion>,
    pub compound_terms: Vec<String>,
    pub additional_terms: Vec<String>,
    pub paths: Vec<Vec<String>>,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

impl QueryAnalysis {
    /// Summarize a lattice whose paths have already been generated.
    pub fn from_lattice(
        stage: &str,
        lattice: &TokenLattice,
        renderer: Option<&DiagramRenderer>,
    ) -> Self {
        let query = lattice.original_query();
        let edges = lattice.edges();

        let mut compound_terms = Vec::new();
        let mut additional_terms = Vec::new();
        for edge in edges {
            if edge.is_additional() {
                push_unique(&mut additional_terms, edge.surface());
            } else if edge.is_multi_position() && !edge.is_synonym() {
                push_unique(&mut compound_terms, edge.surface());
            }
        }

        QueryAnalysis {
            original_query: query.to_string(),
            stage: stage.to_string(),
            tokens: edges
                .iter()
                .map(|e| TokenSummary::from_edge(e, query))
                .collect(),
            synonyms: synonym_expansions(edges, query),
            compound_terms,
            additional_terms,
            paths: lattice
                .paths()
                .iter()
                .map(|p| {
                    lattice
                        .path_surfaces(p)
                        .into_iter()
                        .map(str::to_string)
                        .collect()
                })
                .collect(),
            truncated: lattice.is_truncated(),
            diagram: renderer.map(|r| r.render(lattice)),
        }
    }

    /// Paths joined with spaces, one string per path.
    pub fn path_strings(&self) -> Vec<String> {
        self.paths.iter().map(|p| p.join(" ")).collect()
    }
}

/// Index-view analysis: the token surfaces the index stage keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexAnalysis {
    pub original_query: String,
    pub stage: String,
    pub tokens: Vec<String>,
}

impl IndexAnalysis {
    pub fn from_edges(stage: &str, original_query: &str, edges: &[TokenEdge]) -> Self {
        IndexAnalysis {
            original_query: original_query.to_string(),
            stage: stage.to_string(),
            tokens: edges.iter().map(|e| e.surface().to_string()).collect(),
        }
    }
}

/// Group synonym edges by span, in order of first appearance.
fn synonym_expansions(edges: &[TokenEdge], query: &str) -> Vec<SynonymExpansion> {
    let mut expansions: Vec<SynonymExpansion> = Vec::new();

    for edge in edges.iter().filter(|e| e.is_synonym()) {
        let span = (edge.start_pos(), edge.length());
        if let Some(existing) = expansions
            .iter_mut()
            .find(|x| (x.position, x.length) == span)
        {
            push_unique(&mut existing.synonyms, edge.surface());
            continue;
        }

        let originals: Vec<&str> = edges
            .iter()
            .filter(|e| {
                !e.is_synonym() && !e.is_additional() && (e.start_pos(), e.length()) == span
            })
            .map(TokenEdge::surface)
            .collect();
        let source = if originals.is_empty() {
            edge.covered_text(query)
        } else {
            originals.join(" ")
        };

        expansions.push(SynonymExpansion {
            position: span.0,
            length: span.1,
            source,
            synonyms: vec![edge.surface().to_string()],
        });
    }

    expansions
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
