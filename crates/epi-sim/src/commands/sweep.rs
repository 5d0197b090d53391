use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use epi_engine::OutputConfig;
use epi_exp::SweepPlan;
use epi_graph::NumericPolicy;
use tracing::info;

use super::{load_graph, GraphArgs, SeedArgs, StoreOpts};

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML sweep plan.
    #[arg(long)]
    pub plan: PathBuf,
    #[command(flatten)]
    pub graph: GraphArgs,
    #[command(flatten)]
    pub seeds: SeedArgs,
    /// Override the number of worker threads.
    #[arg(long)]
    pub parallelism: Option<usize>,
}

pub fn run(args: &SweepArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let mut plan = SweepPlan::load(&args.plan)?;
    if let Some(parallelism) = args.parallelism {
        plan.parallelism = parallelism;
    }
    let output = OutputConfig::default();
    let graphs = store.graphs(&output)?;
    let loaded = load_graph(
        args.graph.graph.as_deref(),
        args.graph.format(),
        args.graph.numeric.unwrap_or(NumericPolicy::Auto),
        &graphs,
    )?;
    let initial = args.seeds.labels(&loaded.graph)?;
    let report = epi_exp::sweep(
        &loaded.graph,
        &loaded.uid,
        &initial,
        &plan,
        &store.evolutions_dir(&output),
    )?;
    info!(jobs = report.jobs.len(), "sweep finished");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
