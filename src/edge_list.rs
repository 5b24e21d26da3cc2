//! With EdgeList::parse(), reads the edge list that a ranked graph is built from.
//!
//! The input is an edge count, a power iteration count, and then that many pairs of
//! vertex names, all separated by whitespace.
use log::warn;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::{RankError, Result};
use crate::graph::RankedGraph;

#[derive(Parser)]
#[grammar = "edge_list.pest"]
pub struct EdgeListParser;

/// Edges to insert into a graph, and the number of power iterations to rank it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    power_iterations: usize,
    edges: Vec<(String, String)>,
}

impl EdgeList {
    /// Parse an edge list.
    ///
    /// * Exactly the announced number of edges is kept.  Any pairs after those are
    ///   ignored, with a warning.
    /// * Fewer pairs than announced is an error.
    pub fn parse(input: &str) -> Result<Self> {
        let mut records = EdgeListParser::parse(Rule::edge_list, input)?;

        let expected = count_from_pair(records.next(), "edge")?;
        let power_iterations = count_from_pair(records.next(), "power iteration")?;

        let mut edges = Vec::new();
        for record in records {
            match record.as_rule() {
                Rule::edge => {
                    let mut names = record.into_inner();
                    if let (Some(from), Some(to)) = (names.next(), names.next()) {
                        edges.push((from.as_str().to_string(), to.as_str().to_string()));
                    }
                }
                Rule::name => (),
                Rule::EOI => (),
                _ => unreachable!(),
            }
        }

        if edges.len() < expected {
            return Err(RankError::MissingEdges {
                expected,
                found: edges.len(),
            });
        }
        if edges.len() > expected {
            warn!(
                "ignoring {} edges beyond the announced {expected}",
                edges.len() - expected
            );
            edges.truncate(expected);
        }

        Ok(EdgeList {
            power_iterations,
            edges,
        })
    }

    pub fn power_iterations(&self) -> usize {
        self.power_iterations
    }

    /// Edges in input order, as (from, to) names.
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }
}

fn count_from_pair(pair: Option<Pair<Rule>>, what: &'static str) -> Result<usize> {
    let value = pair.map(|pair| pair.as_str()).unwrap_or_default();

    value.parse().map_err(|_| RankError::InvalidCount {
        what,
        value: value.to_string(),
    })
}

impl From<&EdgeList> for RankedGraph {
    fn from(edge_list: &EdgeList) -> Self {
        edge_list
            .edges()
            .iter()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect()
    }
}
