//! Output formatting for CLI commands.

use std::io::Write;

use serde::Serialize;

use crate::analysis::diagram::DiagramFormat;
use crate::analysis::report::{IndexAnalysis, QueryAnalysis};
use crate::cli::args::{OutputFormat, QueryLatticeArgs};
use crate::error::Result;

/// Result structure for diagram rendering.
#[derive(Debug, Serialize)]
pub struct DiagramOutput {
    pub original_query: String,
    pub stage: String,
    pub format: DiagramFormat,
    pub diagram: String,
}

/// One line of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub line: usize,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<QueryAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result structure for batch analysis.
#[derive(Debug, Serialize)]
pub struct BatchResults {
    pub total: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub entries: Vec<BatchEntry>,
}

/// Types that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()>;
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &QueryLatticeArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

impl HumanOutput for QueryAnalysis {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Query: {} (stage: {})", self.original_query, self.stage)?;
        writeln!(out)?;

        if self.tokens.is_empty() {
            writeln!(out, "No tokens found.")?;
            return Ok(());
        }

        writeln!(out, "Tokens:")?;
        writeln!(out, "═══════")?;
        for token in &self.tokens {
            writeln!(
                out,
                "  [{}-{}) {:<16} {:<12} \"{}\"",
                token.position,
                token.position + token.length,
                token.surface,
                token.kind.as_str(),
                token.text
            )?;
        }

        if !self.synonyms.is_empty() {
            writeln!(out)?;
            writeln!(out, "Synonyms:")?;
            for expansion in &self.synonyms {
                writeln!(
                    out,
                    "  {} → {}",
                    expansion.source,
                    expansion.synonyms.join(", ")
                )?;
            }
        }

        if !self.compound_terms.is_empty() {
            writeln!(out)?;
            writeln!(out, "Compound terms: {}", self.compound_terms.join(", "))?;
        }
        if !self.additional_terms.is_empty() {
            writeln!(out, "Additional terms: {}", self.additional_terms.join(", "))?;
        }

        writeln!(out)?;
        let suffix = if self.truncated { ", truncated" } else { "" };
        writeln!(out, "Paths ({}{suffix}):", self.paths.len())?;
        for (i, path) in self.path_strings().iter().enumerate() {
            writeln!(out, "  {}. {path}", i + 1)?;
        }

        if let Some(diagram) = &self.diagram {
            writeln!(out)?;
            writeln!(out, "Diagram:")?;
            write!(out, "{diagram}")?;
        }
        Ok(())
    }
}

impl HumanOutput for IndexAnalysis {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Query: {} (stage: {})", self.original_query, self.stage)?;
        if self.tokens.is_empty() {
            writeln!(out, "No tokens found.")?;
        } else {
            writeln!(out, "Tokens: {}", self.tokens.join(" | "))?;
        }
        Ok(())
    }
}

impl HumanOutput for DiagramOutput {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        // Raw diagram text only, so it can be piped into a renderer.
        write!(out, "{}", self.diagram)
    }
}

impl HumanOutput for BatchResults {
    fn write_human(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for entry in &self.entries {
            match (&entry.analysis, &entry.error) {
                (Some(analysis), _) => {
                    writeln!(
                        out,
                        "{:>4}: {} → {} path(s)",
                        entry.line,
                        entry.query,
                        analysis.paths.len()
                    )?;
                    for path in analysis.path_strings() {
                        writeln!(out, "        {path}")?;
                    }
                }
                (None, Some(error)) => {
                    writeln!(out, "{:>4}: {} → error: {error}", entry.line, entry.query)?;
                }
                (None, None) => {}
            }
        }
        writeln!(out)?;
        writeln!(
            out,
            "{} request(s), {} failed, {} ms",
            self.total, self.failed, self.duration_ms
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::analysis::lattice::TokenLattice;
    use crate::analysis::token::{TokenEdge, TokenKind};

    fn analysis() -> QueryAnalysis {
        let mut lattice = TokenLattice::new(
            "삼성전자",
            vec![
                TokenEdge::with_offsets("삼성", TokenKind::Word, 0, 1, 0, 2).unwrap(),
                TokenEdge::with_offsets("samsung", TokenKind::Synonym, 0, 1, 0, 2).unwrap(),
                TokenEdge::with_offsets("전자", TokenKind::Word, 1, 1, 2, 4).unwrap(),
            ],
        );
        lattice.generate_paths();
        QueryAnalysis::from_lattice("synonym_filter", &lattice, None)
    }

    fn args(extra: &[&str]) -> QueryLatticeArgs {
        let mut argv = vec!["query-lattice"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["index", "-", "q"]);
        QueryLatticeArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        output_result(&mut out, "Analysis complete", &analysis(), &args(&[])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Query: 삼성전자 (stage: synonym_filter)"));
        assert!(text.contains("삼성 → samsung"));
        assert!(text.contains("Paths (2):"));
        assert!(text.contains("  1. 삼성 전자"));
        assert!(text.contains("  2. samsung 전자"));
        assert!(!text.contains("Analysis complete"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        output_result(&mut out, "ignored", &analysis(), &args(&["--format", "json"])).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["original_query"], "삼성전자");
        assert_eq!(value["paths"][1][0], "samsung");
    }

    #[test]
    fn test_empty_index_analysis() {
        let mut out = Vec::new();
        let empty = IndexAnalysis::from_edges("stopword_filter", "q", &[]);
        output_result(&mut out, "ignored", &empty, &args(&[])).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("No tokens found."));
    }
}
