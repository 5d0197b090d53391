use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use epi_core::RngHandle;
use epi_engine::{Evolution, EvolutionRecord, SimulationConfig};
use tracing::{debug, info, warn};

use super::{load_graph, GraphArgs, SeedArgs, StoreOpts};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub graph: GraphArgs,
    #[command(flatten)]
    pub seeds: SeedArgs,
    /// Per-contact infection probability.
    #[arg(short, long)]
    pub probability: Option<f64>,
    /// Rounds spent infectious.
    #[arg(long)]
    pub infection: Option<u32>,
    /// Rounds of immunity; recovery is permanent when omitted.
    #[arg(long)]
    pub recovery: Option<u32>,
    /// Seed of the random source.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Stop after this many rounds even if nodes are still infectious.
    #[arg(long)]
    pub max_rounds: Option<usize>,
    /// YAML configuration; command line flags take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the evolution JSON instead of its UID.
    #[arg(long)]
    pub print: bool,
}

impl SimulateArgs {
    fn config(&self) -> Result<SimulationConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(probability) = self.probability {
            config.model.contagion_probability = probability;
        }
        if let Some(infection) = self.infection {
            config.model.infection_duration = infection;
        }
        if self.recovery.is_some() {
            config.model.recovery_duration = self.recovery;
        }
        if self.seed.is_some() {
            config.seed_policy.master_seed = self.seed;
        }
        if self.max_rounds.is_some() {
            config.limits.max_rounds = self.max_rounds;
        }
        if let Some(numeric) = self.graph.numeric {
            config.numeric = numeric;
        }
        Ok(config)
    }
}

pub fn run(args: &SimulateArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let config = args.config()?;
    let params = config.model.to_params()?;
    let graphs = store.graphs(&config.output)?;
    let loaded = load_graph(
        args.graph.graph.as_deref(),
        args.graph.format(),
        config.numeric,
        &graphs,
    )?;
    let initial = args.seeds.labels(&loaded.graph)?;
    let seed = config.seed_policy.resolve();
    debug!(
        graph = %loaded.uid,
        nodes = loaded.graph.node_count(),
        initial = initial.len(),
        seed,
        run = config.seed_policy.label.as_deref().unwrap_or("-"),
        "starting evolution"
    );

    let mut evolution = Evolution::new(&loaded.graph, initial, params, RngHandle::from_seed(seed))?;
    let outcome = evolution.run_bounded(config.limits.max_rounds)?;
    if outcome.truncated {
        warn!(rounds = outcome.rounds, "round ceiling reached with infectious nodes left");
    }
    let record = EvolutionRecord::from_evolution(&evolution)
        .with_graph_uid(loaded.uid.as_str())
        .with_seed(Some(seed))
        .with_truncated(outcome.truncated);
    let bytes = record.to_json_bytes()?;
    let uid = store
        .evolutions(&config.output)?
        .save_evolution(&loaded.uid, &bytes)?;
    info!(uid = %uid, rounds = outcome.rounds, "evolution saved");

    if args.print {
        print!("{}", String::from_utf8(bytes)?);
    } else {
        println!("{uid}");
    }
    Ok(())
}
