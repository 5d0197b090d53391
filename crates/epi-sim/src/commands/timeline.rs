use std::collections::BTreeSet;
use std::error::Error;
use std::path::Path;

use clap::Args;
use epi_core::Label;
use epi_engine::{render_timeline, EvolutionRecord, OutputConfig, Palette};
use epi_graph::{Graph, GraphFormat, NumericPolicy};
use tracing::debug;

use super::{read_input, StoreOpts};

#[derive(Args, Debug)]
pub struct TimelineArgs {
    /// Evolution UID prefix, or a path to an evolution JSON file.
    pub evolution: String,
    /// Graph UID prefix or file fixing the node order.
    #[arg(long)]
    pub graph: Option<String>,
    /// Read `--graph` as an edge list.
    #[arg(long)]
    pub edges: bool,
    /// Numeric label coercion for `--graph`: never, auto, always. Defaults to
    /// the coercion whose labels match the evolution.
    #[arg(long, value_name = "MODE")]
    pub numeric: Option<NumericPolicy>,
    /// Draw S, I, R letters instead of coloured cells.
    #[arg(long)]
    pub plain: bool,
}

/// Labels the record knows about: its node list, or every label in its rounds.
fn recorded_labels(record: &EvolutionRecord) -> BTreeSet<Label> {
    if !record.nodes.is_empty() {
        return record.nodes.iter().cloned().collect();
    }
    record
        .rounds
        .iter()
        .flat_map(|round| round.infectious.iter().chain(round.recovered.iter()))
        .cloned()
        .collect()
}

/// First coercion under which the graph's labels agree with the record's, so
/// a timeline renders with the policy the run used.
fn matching_policy(graph: &Graph, recorded: &BTreeSet<Label>) -> NumericPolicy {
    [NumericPolicy::Never, NumericPolicy::Auto, NumericPolicy::Always]
        .into_iter()
        .find(|policy| {
            let labels = policy.apply(graph);
            recorded.iter().all(|label| labels.contains(label))
        })
        .unwrap_or_default()
}

pub fn run(args: &TimelineArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let output = OutputConfig::default();
    let record = if Path::new(&args.evolution).is_file() {
        EvolutionRecord::load(Path::new(&args.evolution))?
    } else {
        let root = store.evolutions_dir(&output);
        let (_, bytes) = epi_store::load(&root, &args.evolution)?;
        EvolutionRecord::from_json_slice(&bytes)?
    };

    let nodes = match &args.graph {
        Some(source) => {
            let bytes = if Path::new(source).is_file() {
                read_input(Some(Path::new(source)))?
            } else {
                epi_store::load(&store.graphs_dir(&output), source)?.1
            };
            let format = if args.edges {
                GraphFormat::Edges
            } else {
                GraphFormat::Adjacency
            };
            let graph = format.parse(&String::from_utf8(bytes)?)?;
            let policy = match args.numeric {
                Some(policy) => policy,
                None => matching_policy(&graph, &recorded_labels(&record)),
            };
            policy.apply(&graph).labels().to_vec()
        }
        None if !record.nodes.is_empty() => record.nodes.clone(),
        None => recorded_labels(&record).into_iter().collect(),
    };
    debug!(nodes = nodes.len(), rounds = record.rounds.len(), "rendering timeline");

    let palette = if args.plain { Palette::Plain } else { Palette::Ansi };
    print!("{}", render_timeline(&nodes, &record.trace(), palette));
    Ok(())
}
