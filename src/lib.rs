//! Rank the vertices of a directed graph built from an edge list.

pub mod api;
pub mod edge_list;
pub mod error;
pub mod graph;
pub mod graph_examples;
pub mod logger;
