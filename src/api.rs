//! Top level api methods for ranked-graph.

use crate::{edge_list::EdgeList, error::Result, graph::RankedGraph, graph::Ranks};

/// Given an edge list, build its graph and return the rank of every vertex.
///
/// Fails if the edge list is malformed, or if it holds no edges to rank.
pub fn rank_edge_list(input: &str) -> Result<Ranks> {
    let edge_list = EdgeList::parse(input)?;
    let graph = RankedGraph::from(&edge_list);

    graph.rank(edge_list.power_iterations())
}
