//! Represents a vertex (a named page) within a ranked graph.

use std::collections::HashSet;

// Each vertex lives at a dense index in the graph's arena.  Edges are only stored on
// the destination side, as the set of source indices flowing into this vertex.  The
// source side only keeps a count of its distinct outgoing edges.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Vertex {
    /// Name given by the caller.  Unique within a graph.
    pub(super) name: String,
    /// Indices of every vertex with an edge pointing into this vertex.
    pub(super) inflows: HashSet<usize>,
    /// Number of distinct edges leaving this vertex.
    pub(super) outdegree: usize,
}

impl Vertex {
    pub fn new(name: &str) -> Self {
        Vertex {
            name: name.to_string(),
            inflows: HashSet::new(),
            outdegree: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inflows(&self) -> &HashSet<usize> {
        &self.inflows
    }

    pub fn outdegree(&self) -> usize {
        self.outdegree
    }

    /// Record src_idx as flowing into this vertex.
    ///
    /// Returns false if src_idx was already an inflow.
    pub(super) fn add_inflow(&mut self, src_idx: usize) -> bool {
        self.inflows.insert(src_idx)
    }
}
