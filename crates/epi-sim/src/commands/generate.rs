use std::error::Error;

use clap::{Args, ValueEnum};
use epi_core::RngHandle;
use epi_engine::SeedPolicy;
use epi_graph::{to_adjlist, Template};
use tracing::{debug, info};

use super::StoreOpts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateName {
    #[value(name = "CYCLE")]
    Cycle,
    #[value(name = "ERDOS_RENYI")]
    ErdosRenyi,
    #[value(name = "MATCHING")]
    Matching,
    #[value(name = "CYCLE_U_ERDOS_RENYI")]
    CycleErdosRenyi,
    #[value(name = "CYCLE_U_MATCHING")]
    CycleMatching,
    #[value(name = "TORUS")]
    Torus,
    #[value(name = "TORUS_U_ERDOS_RENYI")]
    TorusErdosRenyi,
    #[value(name = "TORUS_U_MATCHING")]
    TorusMatching,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Graph family to generate.
    #[arg(value_enum)]
    pub template: TemplateName,
    /// Number of nodes (cycle, Erdős–Rényi and matching families).
    #[arg(long)]
    pub nodes: Option<usize>,
    /// Torus columns.
    #[arg(long)]
    pub columns: Option<usize>,
    /// Torus rows.
    #[arg(long)]
    pub rows: Option<usize>,
    /// Edge probability of the Erdős–Rényi families.
    #[arg(long)]
    pub probability: Option<f64>,
    /// Seed for the randomised families; drawn from OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Store the graph and print its UID instead of the adjacency list.
    #[arg(long)]
    pub save: bool,
}

fn required<T: Copy>(value: Option<T>, flag: &str, template: TemplateName) -> Result<T, String> {
    value.ok_or_else(|| format!("{template:?} requires --{flag}"))
}

impl GenerateArgs {
    fn template(&self) -> Result<Template, String> {
        let name = self.template;
        let nodes = || required(self.nodes, "nodes", name);
        let columns = || required(self.columns, "columns", name);
        let rows = || required(self.rows, "rows", name);
        let probability = || required(self.probability, "probability", name);
        Ok(match name {
            TemplateName::Cycle => Template::Cycle { nodes: nodes()? },
            TemplateName::ErdosRenyi => Template::ErdosRenyi {
                nodes: nodes()?,
                probability: probability()?,
            },
            TemplateName::Matching => Template::Matching { nodes: nodes()? },
            TemplateName::CycleErdosRenyi => Template::CycleErdosRenyi {
                nodes: nodes()?,
                probability: probability()?,
            },
            TemplateName::CycleMatching => Template::CycleMatching { nodes: nodes()? },
            TemplateName::Torus => Template::Torus {
                columns: columns()?,
                rows: rows()?,
            },
            TemplateName::TorusErdosRenyi => Template::TorusErdosRenyi {
                columns: columns()?,
                rows: rows()?,
                probability: probability()?,
            },
            TemplateName::TorusMatching => Template::TorusMatching {
                columns: columns()?,
                rows: rows()?,
            },
        })
    }
}

pub fn run(args: &GenerateArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let template = args.template()?;
    let seed = SeedPolicy {
        master_seed: args.seed,
        label: None,
    }
    .resolve();
    debug!(template = template.name(), seed, "generating graph");
    let graph = template.build(&mut RngHandle::from_seed(seed))?;
    let text = to_adjlist(&graph);
    if args.save {
        let uid = store.graphs(&Default::default())?.save_graph(text.as_bytes())?;
        info!(uid = %uid, nodes = graph.node_count(), edges = graph.edge_count(), "graph saved");
        println!("{uid}");
    } else {
        print!("{text}");
    }
    Ok(())
}
