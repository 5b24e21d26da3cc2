//! Ranks computed for a graph, ordered by vertex name.

use std::{collections::BTreeMap, fmt::Display};

/// Digits printed after the decimal point when displaying a score.
pub const SCORE_PRECISION: usize = 2;

/// Mapping from vertex name to its rank.
///
/// Iteration is always in ascending lexicographic order of the names, which is what
/// the displayed output relies on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranks {
    scores: BTreeMap<String, f64>,
}

impl Ranks {
    pub(super) fn new(scores: BTreeMap<String, f64>) -> Self {
        Ranks { scores }
    }

    /// Return the rank of the named vertex, if the vertex exists.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.scores.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.scores
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.scores.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Sum of all ranks.  Stays at 1.0 only while no rank leaks through a vertex
    /// without outgoing edges.
    pub fn total(&self) -> f64 {
        self.scores.values().fold(0.0, |total, score| total + score)
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.scores
    }
}

impl Display for Ranks {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        for (name, score) in self.iter() {
            writeln!(fmt, "{} {:.*}", name, SCORE_PRECISION, score)?;
        }

        Ok(())
    }
}
