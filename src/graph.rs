//! A directed graph built one edge at a time, ranked with a damping-free PageRank.
//!
//! Vertices are named by the caller and assigned dense indices in the order they are
//! first seen.  Edges are stored only as inflow sets on the destination vertex, and
//! each source vertex keeps a count of its distinct outgoing edges.  Ranking is a
//! fixed number of synchronous power iterations over those inflow sets.

mod ranks;
mod vertex;

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Display,
    mem::replace,
};

use itertools::Itertools;
use log::{debug, trace};

use crate::error::{RankError, Result};

pub use self::{ranks::Ranks, ranks::SCORE_PRECISION, vertex::Vertex};

/// Graph of named vertices which can be ranked by power iteration.
///
/// Vertices are kept in an arena indexed by the order in which their names were
/// first inserted.  Indices never change and are never reused, since nothing can
/// be removed from the graph.
#[derive(Debug, Default, Clone)]
pub struct RankedGraph {
    /// All vertices, indexed by first-seen order.
    vertices: Vec<Vertex>,
    /// Name of each vertex mapped to its index in vertices.
    key_map: HashMap<String, usize>,
}

impl RankedGraph {
    pub fn new() -> Self {
        RankedGraph {
            vertices: vec![],
            key_map: HashMap::new(),
        }
    }

    /// Number of distinct vertex names seen so far.
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of distinct edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|vertex| vertex.outdegree).sum()
    }

    /// Map of vertex names to their indices.
    pub fn key_map(&self) -> &HashMap<String, usize> {
        &self.key_map
    }

    /// Return the index of the named vertex.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.key_map.get(name).copied()
    }

    pub fn name(&self, vertex_idx: usize) -> &str {
        &self.vertices[vertex_idx].name
    }

    /// Indices of the vertices with an edge pointing into vertex_idx.
    pub fn inflows(&self, vertex_idx: usize) -> &HashSet<usize> {
        &self.vertices[vertex_idx].inflows
    }

    pub fn outdegree(&self, vertex_idx: usize) -> usize {
        self.vertices[vertex_idx].outdegree
    }

    /// Iterate over every vertex's inflow set, in index order.
    pub fn inflow_table(&self) -> impl Iterator<Item = (usize, &HashSet<usize>)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(vertex_idx, vertex)| (vertex_idx, &vertex.inflows))
    }

    /// Insert the edge from -> to, adding either vertex if it has not been seen before.
    ///
    /// When both vertices are new, from is given the lower index.
    ///
    /// Returns true if the edge is new, and false if it was already in the graph.
    /// Whether or not either vertex was created has no bearing on the result.
    pub fn insert(&mut self, from: &str, to: &str) -> bool {
        let from_idx = self.get_or_add_vertex(from);
        let to_idx = self.get_or_add_vertex(to);

        let inserted = self.vertices[to_idx].add_inflow(from_idx);
        if inserted {
            self.vertices[from_idx].outdegree += 1;
        } else {
            trace!("ignoring duplicate edge {from} -> {to}");
        }

        inserted
    }

    fn get_or_add_vertex(&mut self, name: &str) -> usize {
        if let Some(vertex_idx) = self.key_map.get(name) {
            return *vertex_idx;
        }

        let vertex_idx = self.vertices.len();
        self.vertices.push(Vertex::new(name));
        self.key_map.insert(name.to_string(), vertex_idx);

        vertex_idx
    }

    /// Compute the rank of every vertex, keyed by vertex name.
    ///
    /// Every vertex starts with a rank of 1/size.  Each refinement round then sets a
    /// vertex's rank to the sum, over its inflows, of the inflow's previous rank divided
    /// by the inflow's outdegree.  No damping is applied, so rank reaching a vertex
    /// without outgoing edges is never passed on.
    ///
    /// Only power_iterations - 1 rounds are run: the initial uniform distribution counts
    /// as the first iteration, so both 0 and 1 return it unchanged.
    ///
    /// Returns RankError::EmptyGraph if there are no vertices to rank.
    pub fn rank(&self, power_iterations: usize) -> Result<Ranks> {
        if self.is_empty() {
            return Err(RankError::EmptyGraph);
        }

        let size = self.size();
        let rounds = power_iterations.saturating_sub(1);
        debug!("ranking {size} vertices with {rounds} refinement rounds");

        let mut prev_ranks = vec![1.0 / size as f64; size];
        let mut next_ranks = vec![0.0; size];
        for round in 0..rounds {
            for (vertex_idx, vertex) in self.vertices.iter().enumerate() {
                next_ranks[vertex_idx] = self.inflow_rank(vertex, &prev_ranks);
            }
            next_ranks = replace(&mut prev_ranks, next_ranks);

            trace!("round {round}: {prev_ranks:?}");
        }

        let scores = self
            .key_map
            .iter()
            .map(|(name, vertex_idx)| (name.clone(), prev_ranks[*vertex_idx]))
            .collect::<BTreeMap<String, f64>>();

        Ok(Ranks::new(scores))
    }

    /// Sum of the rank flowing into vertex from the previous round.
    ///
    /// Folds from positive zero so a vertex without inflows never displays as "-0.00".
    fn inflow_rank(&self, vertex: &Vertex, prev_ranks: &[f64]) -> f64 {
        vertex.inflows.iter().fold(0.0, |total, src_idx| {
            let outdegree = self.vertices[*src_idx].outdegree;
            debug_assert_ne!(outdegree, 0, "inflow source has no outgoing edges");

            if outdegree == 0 {
                total
            } else {
                total + prev_ranks[*src_idx] / outdegree as f64
            }
        })
    }
}

impl<S: AsRef<str>> Extend<(S, S)> for RankedGraph {
    fn extend<I: IntoIterator<Item = (S, S)>>(&mut self, edges: I) {
        for (from, to) in edges {
            self.insert(from.as_ref(), to.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, S)> for RankedGraph {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(edges: I) -> Self {
        let mut graph = RankedGraph::new();
        graph.extend(edges);

        graph
    }
}

impl Display for RankedGraph {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        for (dst_idx, inflows) in self.inflow_table() {
            let dst = self.name(dst_idx);

            for src_idx in inflows.iter().sorted() {
                writeln!(fmt, "{} -> {dst}", self.name(*src_idx))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SIZE: usize = 100_000;

    /// Chain "0" -> "1" -> ... -> "len", closed by "len" -> "0".
    fn cycle_graph(len: usize) -> RankedGraph {
        let mut graph = RankedGraph::new();
        for i in 0..len {
            graph.insert(&i.to_string(), &(i + 1).to_string());
        }
        graph.insert(&len.to_string(), "0");

        graph
    }

    fn two_decimals(ranks: &Ranks) -> Vec<(String, String)> {
        ranks
            .iter()
            .map(|(name, score)| (name.to_string(), format!("{score:.2}")))
            .collect()
    }

    #[test]
    fn test_inserts_succeed() {
        let mut graph = RankedGraph::new();

        for i in 0..TEST_SIZE {
            assert!(graph.insert(&i.to_string(), &(i + 1).to_string()));
        }
        assert!(graph.insert(&TEST_SIZE.to_string(), "0"));
    }

    #[test]
    fn test_inserts_persist() {
        let graph = cycle_graph(TEST_SIZE);

        assert_eq!(graph.size(), TEST_SIZE + 1);
        assert_eq!(graph.edge_count(), TEST_SIZE + 1);
    }

    #[test]
    fn test_maps_align() {
        let graph = cycle_graph(TEST_SIZE);
        let key_map = graph.key_map();

        let mut count = 0;
        for (vertex_idx, _inflows) in graph.inflow_table() {
            assert_eq!(key_map.get(&vertex_idx.to_string()), Some(&vertex_idx));
            count += 1;
        }
        assert_eq!(count, TEST_SIZE + 1);
    }

    #[test]
    fn test_from_indexed_before_to() {
        let mut graph = RankedGraph::new();
        graph.insert("b", "a");
        graph.insert("c", "c");

        assert_eq!(graph.index_of("b"), Some(0));
        assert_eq!(graph.index_of("a"), Some(1));
        assert_eq!(graph.index_of("c"), Some(2));
        assert_eq!(graph.name(1), "a");
    }

    #[test]
    fn test_duplicate_insert_changes_nothing() {
        let mut graph = RankedGraph::new();

        assert!(graph.insert("a", "b"));
        let before = graph.clone();

        assert!(!graph.insert("a", "b"));
        assert_eq!(graph.size(), before.size());
        assert_eq!(graph.outdegree(0), 1);
        assert_eq!(graph.inflows(1).len(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_result_ignores_new_vertices() {
        let mut graph = RankedGraph::new();

        // Both vertices exist already, but the edge does not.
        graph.insert("a", "b");
        assert!(graph.insert("b", "a"));

        // New vertex on a novel edge.
        assert!(graph.insert("a", "c"));
        assert_eq!(graph.outdegree(graph.index_of("a").unwrap()), 2);
    }

    #[test]
    fn test_self_loop() {
        let mut graph = RankedGraph::new();

        assert!(graph.insert("a", "a"));
        assert!(!graph.insert("a", "a"));
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.outdegree(0), 1);
        assert!(graph.inflows(0).contains(&0));

        let ranks = graph.rank(10).unwrap();
        assert_eq!(ranks.get("a"), Some(1.0));
    }

    #[test]
    fn test_outdegree_matches_inflow_membership() {
        let graph: RankedGraph = [
            ("a", "b"),
            ("a", "c"),
            ("b", "c"),
            ("c", "a"),
            ("a", "b"),
            ("d", "a"),
        ]
        .into_iter()
        .collect();

        for vertex_idx in 0..graph.size() {
            let membership = graph
                .inflow_table()
                .filter(|(_, inflows)| inflows.contains(&vertex_idx))
                .count();

            assert_eq!(graph.outdegree(vertex_idx), membership);
        }
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_rank_empty_graph() {
        let graph = RankedGraph::new();

        assert!(matches!(graph.rank(0), Err(RankError::EmptyGraph)));
        assert!(matches!(graph.rank(5), Err(RankError::EmptyGraph)));
    }

    #[test]
    fn test_ranks_sort() {
        let len = (TEST_SIZE as f64).sqrt() as usize;
        let graph = cycle_graph(len);

        for power_iterations in 0..len {
            let ranks = graph.rank(power_iterations).unwrap();
            let names = ranks.names().collect::<Vec<_>>();

            assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(names.len(), len + 1);
        }
    }

    #[test]
    fn test_ranks_compute_even_distribution() {
        let max = (TEST_SIZE as f64).sqrt() as usize;

        for len in 1..max {
            let graph = cycle_graph(len);
            let expected = 1.0 / (len + 1) as f64;

            for (_name, score) in graph.rank(len).unwrap().iter() {
                assert_eq!(score, expected);
            }
        }
    }

    #[test]
    fn test_rank_three_cycle() {
        let graph: RankedGraph = [("A", "B"), ("B", "C"), ("C", "A")].into_iter().collect();
        let ranks = graph.rank(5).unwrap();

        assert_eq!(
            two_decimals(&ranks),
            vec![
                ("A".to_string(), "0.33".to_string()),
                ("B".to_string(), "0.33".to_string()),
                ("C".to_string(), "0.33".to_string()),
            ]
        );
    }

    #[test]
    fn test_rank_fan_out() {
        let graph: RankedGraph = [("A", "B"), ("A", "C")].into_iter().collect();
        let ranks = graph.rank(2).unwrap();

        assert_eq!(ranks.get("A"), Some(0.0));
        assert_eq!(
            two_decimals(&ranks),
            vec![
                ("A".to_string(), "0.00".to_string()),
                ("B".to_string(), "0.17".to_string()),
                ("C".to_string(), "0.17".to_string()),
            ]
        );
    }

    #[test]
    fn test_rank_first_iteration_is_uniform() {
        let graph: RankedGraph = [("A", "B"), ("A", "C")].into_iter().collect();

        // The uniform start counts as the first iteration; no round is computed yet.
        for power_iterations in [0, 1] {
            let ranks = graph.rank(power_iterations).unwrap();
            for (_name, score) in ranks.iter() {
                assert_eq!(score, 1.0 / 3.0);
            }
        }
    }

    #[test]
    fn test_rank_leaks_through_sinks() {
        let graph: RankedGraph = [("A", "B"), ("A", "C")].into_iter().collect();

        // A has no inflow, and B and C pass nothing on, so everything drains away.
        let ranks = graph.rank(3).unwrap();
        assert_eq!(ranks.total(), 0.0);
    }

    #[test]
    fn test_rank_is_synchronous() {
        // An in-place update would let b see a's new rank within the same round.
        let graph: RankedGraph = [("a", "b"), ("b", "a"), ("c", "a")].into_iter().collect();
        let ranks = graph.rank(2).unwrap();
        let third = 1.0 / 3.0;

        assert_eq!(ranks.get("a"), Some(third + third));
        assert_eq!(ranks.get("b"), Some(third));
        assert_eq!(ranks.get("c"), Some(0.0));
    }

    #[test]
    fn test_rank_does_not_mutate() {
        let graph: RankedGraph = [("a", "b"), ("b", "c"), ("c", "a"), ("a", "c")]
            .into_iter()
            .collect();

        let first = graph.rank(7).unwrap();
        let _ = graph.rank(3).unwrap();
        let again = graph.rank(7).unwrap();

        assert_eq!(first, again);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_display_edges() {
        let graph: RankedGraph = [("b", "a"), ("c", "a"), ("a", "c")].into_iter().collect();

        assert_eq!(graph.to_string(), "b -> a\nc -> a\na -> c\n");
    }
}
