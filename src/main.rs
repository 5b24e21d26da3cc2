use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ranked_graph::{api::rank_edge_list, error::RankError, logger};

/// Rank the vertices of a directed graph read as an edge list.
///
/// Input is an edge count and a power iteration count, followed by that many
/// whitespace separated (from, to) vertex names.  Each vertex is printed with its
/// rank, in name order.
#[derive(Parser, Debug)]
#[command(name = "ranked-graph", version)]
struct Cli {
    /// File to read the edge list from.  Reads stdin when absent.
    input: Option<PathBuf>,

    /// Log more detail to stderr.  Repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose).context("unable to install logger")?;

    let input = read_input(cli.input.as_ref())?;
    let ranks = rank_edge_list(&input)?;
    info!("ranked {} vertices", ranks.len());

    print!("{ranks}");

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String, RankError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| RankError::Io {
            source,
            path: path.clone(),
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| RankError::Io {
                    source,
                    path: PathBuf::from("<stdin>"),
                })?;

            Ok(input)
        }
    }
}
