//! Text diagrams of a token lattice.
//!
//! Positions become nodes and every edge becomes a labeled connection, so the
//! analyzer's view of a query can be inspected in any Mermaid or Graphviz
//! viewer.
//!
//! # Examples
//!
//! ```
//! use query_lattice::analysis::diagram::{DiagramFormat, DiagramRenderer};
//! use query_lattice::analysis::lattice::TokenLattice;
//! use query_lattice::analysis::token::{TokenEdge, TokenKind};
//!
//! let lattice = TokenLattice::new(
//!     "갤럭시북",
//!     vec![TokenEdge::new("갤럭시북", TokenKind::Word, 0, 2).unwrap()],
//! );
//!
//! let diagram = DiagramRenderer::new(DiagramFormat::Mermaid).render(&lattice);
//! assert!(diagram.starts_with("graph LR"));
//! assert!(diagram.contains(r#"p0 -->|"갤럭시북 (word)"| p2"#));
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::lattice::TokenLattice;
use crate::analysis::token::{TokenEdge, TokenKind};

/// Output syntax for rendered diagrams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFormat {
    /// Mermaid flowchart (`graph LR`)
    #[default]
    Mermaid,
    /// Graphviz DOT (`digraph`)
    Dot,
}

/// Renders a lattice as diagram text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramRenderer {
    format: DiagramFormat,
}

impl DiagramRenderer {
    pub fn new(format: DiagramFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> DiagramFormat {
        self.format
    }

    /// Render one node per position `0..=max_end_pos` and one connection per
    /// edge, in source order.
    pub fn render(&self, lattice: &TokenLattice) -> String {
        match self.format {
            DiagramFormat::Mermaid => Self::render_mermaid(lattice),
            DiagramFormat::Dot => Self::render_dot(lattice),
        }
    }

    fn render_mermaid(lattice: &TokenLattice) -> String {
        let mut out = String::from("graph LR\n");
        for position in 0..=lattice.max_end_pos() {
            out.push_str(&format!("    p{position}(({position}))\n"));
        }
        for edge in lattice.edges() {
            let arrow = match edge.kind() {
                TokenKind::Synonym => "-.->",
                TokenKind::Additional => "==>",
                TokenKind::Word | TokenKind::Other(_) => "-->",
            };
            let label = label(edge).replace('"', "#quot;");
            out.push_str(&format!(
                "    p{} {arrow}|\"{label}\"| p{}\n",
                edge.start_pos(),
                edge.end_pos()
            ));
        }
        out
    }

    fn render_dot(lattice: &TokenLattice) -> String {
        let mut out = String::from("digraph lattice {\n    rankdir=LR;\n    node [shape=circle];\n");
        for position in 0..=lattice.max_end_pos() {
            out.push_str(&format!("    {position};\n"));
        }
        for edge in lattice.edges() {
            let style = match edge.kind() {
                TokenKind::Synonym => ", style=dashed",
                TokenKind::Additional => ", style=bold",
                TokenKind::Word | TokenKind::Other(_) => "",
            };
            let label = label(edge).replace('\\', "\\\\").replace('"', "\\\"");
            out.push_str(&format!(
                "    {} -> {} [label=\"{label}\"{style}];\n",
                edge.start_pos(),
                edge.end_pos()
            ));
        }
        out.push_str("}\n");
        out
    }
}

fn label(edge: &TokenEdge) -> String {
    format!("{} ({})", edge.surface(), edge.kind())
}
