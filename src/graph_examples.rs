//! Examples of edge lists to be used for testing.

use crate::{edge_list::EdgeList, graph::RankedGraph};

pub const GRAPH_EXAMPLES: [(&str, &str); 10] = [
    ("three_cycle",         "3 5\nA B\nB C\nC A"),
    ("fan_out",             "2 2\nA B\nA C"),
    ("fan_out_unrefined",   "2 1\nA B\nA C"),
    ("fan_out_no_rounds",   "2 0\nA B\nA C"),
    ("two_cycle",           "2 10\na b\nb a"),
    ("self_loop",           "1 4\na a"),
    ("fan_in",              "3 2\nb a\nc a\nd a"),
    ("duplicate_edges",     "4 3\na b\na b\nb a\nb a"),
    ("split_cycle",         "4 3\na b\na c\nb c\nc a"),
    (
        "web_pages",
        "7 2
        google.com gmail.com
        google.com maps.com
        facebook.com ufl.edu
        ufl.edu google.com
        ufl.edu gmail.com
        maps.com facebook.com
        gmail.com maps.com",
    ),
];

/// Return the parsed edge list of the named example.
///
/// panics if there is no such example, or if the example does not parse.
pub fn example_edge_list(title: &str) -> EdgeList {
    for (example_title, edge_list) in GRAPH_EXAMPLES {
        if title == example_title {
            return match EdgeList::parse(edge_list) {
                Ok(edge_list) => edge_list,
                Err(e) => panic!("example {title} does not parse: {e}"),
            };
        }
    }
    panic!("Could not find requested example: {title}")
}

pub fn example_graph(title: &str) -> RankedGraph {
    RankedGraph::from(&example_edge_list(title))
}
