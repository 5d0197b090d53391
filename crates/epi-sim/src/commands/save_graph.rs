use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use epi_graph::GraphFormat;
use tracing::info;

use super::{read_input, StoreOpts};

#[derive(Args, Debug)]
pub struct SaveGraphArgs {
    /// Graph file; stdin when omitted or `-`.
    pub file: Option<PathBuf>,
    /// Validate the file as an edge list instead of an adjacency list.
    #[arg(long)]
    pub edges: bool,
}

pub fn run(args: &SaveGraphArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let bytes = read_input(args.file.as_deref())?;
    let format = if args.edges {
        GraphFormat::Edges
    } else {
        GraphFormat::Adjacency
    };
    let graph = format.parse(std::str::from_utf8(&bytes)?)?;
    let uid = store.graphs(&Default::default())?.save_graph(&bytes)?;
    info!(uid = %uid, nodes = graph.node_count(), edges = graph.edge_count(), "graph saved");
    println!("{uid}");
    Ok(())
}
