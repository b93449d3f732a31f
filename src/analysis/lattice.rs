//! Token lattice and exhaustive path enumeration.
//!
//! A [`TokenLattice`] owns every [`TokenEdge`] produced for one query. Edges
//! are anchored at integer positions and may overlap: synonyms share a start
//! position with the token they replace, and compounds span several positions
//! otherwise covered by shorter edges.
//!
//! ```text
//! edges: 삼성[0,1) samsung[0,1) 전자[1,2)
//!
//!      ┌── 삼성 ───┐
//!   (0)            (1) ── 전자 ── (2)
//!      └─ samsung ─┘
//!
//! paths: [삼성, 전자], [samsung, 전자]
//! ```
//!
//! [`TokenLattice::generate_paths`] walks the lattice depth-first from
//! position 0 and records every gap-free, non-overlapping sequence of edges
//! that reaches the furthest end position. `Additional` edges are side
//! annotations and never take part in the walk.

use ahash::AHashMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::analysis::token::TokenEdge;

/// One complete segmentation of the query.
///
/// A path stores indices into the owning lattice's edge list; resolve them
/// with [`TokenLattice::path_edges`] or [`TokenLattice::path_surfaces`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Path {
    edge_indices: Vec<usize>,
}

impl Path {
    /// Indices of the edges on this path, in walk order.
    pub fn edge_indices(&self) -> &[usize] {
        &self.edge_indices
    }

    pub fn len(&self) -> usize {
        self.edge_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_indices.is_empty()
    }
}

/// The analysis result for one query: its edges and derived paths.
#[derive(Clone, Debug, Serialize)]
pub struct TokenLattice {
    original_query: String,
    edges: Vec<TokenEdge>,
    paths: Vec<Path>,
    #[serde(skip)]
    max_paths: Option<usize>,
    truncated: bool,
}

impl TokenLattice {
    /// Create a lattice over `edges`. Paths stay empty until
    /// [`generate_paths`](Self::generate_paths) is called.
    pub fn new<S: Into<String>>(original_query: S, edges: Vec<TokenEdge>) -> Self {
        TokenLattice {
            original_query: original_query.into(),
            edges,
            paths: Vec::new(),
            max_paths: None,
            truncated: false,
        }
    }

    /// A lattice with no edges, used when the analyzer response carries
    /// nothing to show.
    pub fn empty<S: Into<String>>(original_query: S) -> Self {
        Self::new(original_query, Vec::new())
    }

    /// Stop enumeration after `limit` completed paths. `None` means unbounded.
    pub fn with_max_paths(mut self, limit: Option<usize>) -> Self {
        self.max_paths = limit;
        self
    }

    pub fn original_query(&self) -> &str {
        &self.original_query
    }

    pub fn edges(&self) -> &[TokenEdge] {
        &self.edges
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the last enumeration stopped at the configured path limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Edges that take part in path search (everything but `Additional`).
    pub fn traversable_edges(&self) -> impl Iterator<Item = &TokenEdge> {
        self.edges.iter().filter(|e| !e.is_additional())
    }

    /// Side-channel edges excluded from path search.
    pub fn additional_edges(&self) -> impl Iterator<Item = &TokenEdge> {
        self.edges.iter().filter(|e| e.is_additional())
    }

    /// Traversable edges leaving `position`, in source order.
    pub fn edges_starting_at(&self, position: usize) -> impl Iterator<Item = &TokenEdge> {
        self.traversable_edges()
            .filter(move |e| e.start_pos() == position)
    }

    /// Final position every path must reach: the maximum end position over
    /// traversable edges, or `None` if there are none.
    pub fn target_position(&self) -> Option<usize> {
        self.traversable_edges().map(TokenEdge::end_pos).max()
    }

    /// Maximum end position over all edges, `Additional` included.
    pub fn max_end_pos(&self) -> usize {
        self.edges.iter().map(TokenEdge::end_pos).max().unwrap_or(0)
    }

    /// Resolve a path into the edges it visits.
    pub fn path_edges<'a, 'p>(&'a self, path: &'p Path) -> impl Iterator<Item = &'a TokenEdge> {
        path.edge_indices.iter().map(move |&i| &self.edges[i])
    }

    /// Surface forms along a path. The result borrows only the lattice.
    pub fn path_surfaces<'a>(&'a self, path: &Path) -> Vec<&'a str> {
        self.path_edges(path).map(TokenEdge::surface).collect()
    }

    /// Enumerate every complete segmentation and store it in `paths`.
    ///
    /// Deterministic and idempotent: edges sharing a start position are tried
    /// in source order, so repeated calls produce the same paths in the same
    /// order.
    pub fn generate_paths(&mut self) {
        let (paths, truncated) = self.enumerate_paths();
        self.paths = paths;
        self.truncated = truncated;
    }

    fn enumerate_paths(&self) -> (Vec<Path>, bool) {
        let Some(target) = self.target_position() else {
            debug!(
                edges = self.edges.len(),
                "no traversable edges, lattice has no paths"
            );
            return (Vec::new(), false);
        };

        let mut buckets: AHashMap<usize, Vec<usize>> = AHashMap::new();
        for (index, edge) in self.edges.iter().enumerate() {
            if !edge.is_additional() {
                buckets.entry(edge.start_pos()).or_default().push(index);
            }
        }

        let mut search = PathSearch {
            edges: &self.edges,
            buckets: &buckets,
            target,
            limit: self.max_paths,
            current: Vec::new(),
            found: Vec::new(),
            truncated: false,
        };
        search.walk(0);

        if search.truncated {
            warn!(
                query = %self.original_query,
                limit = ?self.max_paths,
                "path enumeration stopped at the configured limit"
            );
        }
        debug!(
            edges = self.edges.len(),
            target,
            paths = search.found.len(),
            "enumerated lattice paths"
        );

        (search.found, search.truncated)
    }
}

/// Depth-first walk state for one enumeration.
struct PathSearch<'a> {
    edges: &'a [TokenEdge],
    buckets: &'a AHashMap<usize, Vec<usize>>,
    target: usize,
    limit: Option<usize>,
    current: Vec<usize>,
    found: Vec<Path>,
    truncated: bool,
}

impl PathSearch<'_> {
    fn walk(&mut self, position: usize) {
        if self.truncated {
            return;
        }

        if position == self.target {
            if self.limit.is_some_and(|limit| self.found.len() >= limit) {
                self.truncated = true;
                return;
            }
            trace!(path = ?self.current, "recorded path");
            self.found.push(Path {
                edge_indices: self.current.clone(),
            });
            return;
        }

        let (edges, buckets) = (self.edges, self.buckets);
        // A position with no outgoing edges is a dead end, not an error.
        let Some(bucket) = buckets.get(&position) else {
            return;
        };

        for &index in bucket {
            self.current.push(index);
            self.walk(edges[index].end_pos());
            self.current.pop();
        }
    }
}
