//! Errors surfaced while reading edge lists and ranking graphs.

use std::path::PathBuf;

use thiserror::Error;

use crate::edge_list::Rule;

#[derive(Debug, Error)]
pub enum RankError {
    /// Ranking needs at least one vertex to spread the initial rank over.
    #[error("cannot rank an empty graph")]
    EmptyGraph,

    #[error("unable to parse edge list: {0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),

    #[error("invalid {what} count: {value}")]
    InvalidCount { what: &'static str, value: String },

    #[error("edge list announced {expected} edges but only {found} were given")]
    MissingEdges { expected: usize, found: usize },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, RankError>;

impl From<pest::error::Error<Rule>> for RankError {
    fn from(e: pest::error::Error<Rule>) -> Self {
        RankError::Parse(Box::new(e))
    }
}
