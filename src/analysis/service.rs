//! Entry point tying parser, lattice and reports to a configuration.
//!
//! The service decides nothing about which analyzer to call; it only knows
//! which tokenfilter names carry the search and index views of a response.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::diagram::DiagramRenderer;
use crate::analysis::lattice::TokenLattice;
use crate::analysis::parser::LatticeParser;
use crate::analysis::report::{IndexAnalysis, QueryAnalysis};
use crate::config::AnalysisConfig;
use crate::error::Result;

/// One query and the analyzer response produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub query: String,
    pub response: serde_json::Value,
}

/// Analyzes analyzer responses according to an [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisService {
    config: AnalysisConfig,
    parser: LatticeParser,
    renderer: DiagramRenderer,
}

impl AnalysisService {
    pub fn new(config: AnalysisConfig) -> Self {
        let parser = LatticeParser::new().with_max_paths(config.max_paths);
        let renderer = DiagramRenderer::new(config.diagram_format);
        Self {
            config,
            parser,
            renderer,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Build the lattice for an explicitly named stage.
    pub fn analyze_stage(&self, raw: &[u8], query: &str, stage: &str) -> Result<TokenLattice> {
        self.parser.parse(raw, query, stage)
    }

    /// Search view: lattice of the configured synonym stage, summarized.
    pub fn analyze_search(&self, raw: &[u8], query: &str) -> Result<QueryAnalysis> {
        self.summarize(raw, query, &self.config.search_stage)
    }

    /// Search-style report for any stage.
    pub fn summarize(&self, raw: &[u8], query: &str, stage: &str) -> Result<QueryAnalysis> {
        let lattice = self.analyze_stage(raw, query, stage)?;
        Ok(self.report(stage, &lattice))
    }

    fn report(&self, stage: &str, lattice: &TokenLattice) -> QueryAnalysis {
        let renderer = self.config.include_diagram.then_some(&self.renderer);
        QueryAnalysis::from_lattice(stage, lattice, renderer)
    }

    /// Index view: surfaces of the configured stopword stage, no paths.
    pub fn analyze_index(&self, raw: &[u8], query: &str) -> Result<IndexAnalysis> {
        let stage = &self.config.index_stage;
        let edges = self.parser.parse_edges(raw, stage)?;
        debug!(stage = %stage, tokens = edges.len(), "built index view");
        Ok(IndexAnalysis::from_edges(stage, query, &edges))
    }

    /// Render the diagram of one stage.
    pub fn diagram(&self, raw: &[u8], query: &str, stage: &str) -> Result<String> {
        let lattice = self.analyze_stage(raw, query, stage)?;
        Ok(self.renderer.render(&lattice))
    }

    /// Analyze many requests in parallel, returning results in request order.
    ///
    /// Each request builds its own lattice; a failed request does not affect
    /// the others.
    pub fn analyze_batch(&self, requests: &[AnalysisRequest]) -> Vec<Result<QueryAnalysis>> {
        info!(requests = requests.len(), "analyzing batch");
        requests
            .par_iter()
            .map(|request| {
                let stage = &self.config.search_stage;
                let lattice = self
                    .parser
                    .parse_value(&request.response, &request.query, stage)?;
                Ok(self.report(stage, &lattice))
            })
            .collect()
    }
}
