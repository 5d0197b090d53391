use std::error::Error;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    generate::{self, GenerateArgs},
    resolve::{self, ResolveArgs},
    save_graph::{self, SaveGraphArgs},
    simulate::{self, SimulateArgs},
    sweep::{self, SweepArgs},
    timeline::{self, TimelineArgs},
    verify::{self, VerifyArgs},
    StoreOpts,
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "epi-sim", about = "Epidemic propagation over contact networks")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Directory holding graph artifacts.
    #[arg(long, global = true)]
    graphs_dir: Option<PathBuf>,
    /// Directory holding evolution artifacts.
    #[arg(long, global = true)]
    evolutions_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a graph from a template.
    Generate(GenerateArgs),
    /// Store a graph file verbatim and print its UID.
    SaveGraph(SaveGraphArgs),
    /// Run one contagion and store its evolution.
    Simulate(SimulateArgs),
    /// Run a probability sweep described by a YAML plan.
    Sweep(SweepArgs),
    /// Print the artifact path behind a UID prefix.
    Resolve(ResolveArgs),
    /// Render a stored evolution round by round.
    Timeline(TimelineArgs),
    /// Check a stored graph against its UID.
    Verify(VerifyArgs),
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    } else {
        EnvFilter::new(fallback)
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let store = StoreOpts {
        graphs_dir: cli.graphs_dir,
        evolutions_dir: cli.evolutions_dir,
    };
    match cli.command {
        Command::Generate(args) => generate::run(&args, &store),
        Command::SaveGraph(args) => save_graph::run(&args, &store),
        Command::Simulate(args) => simulate::run(&args, &store),
        Command::Sweep(args) => sweep::run(&args, &store),
        Command::Resolve(args) => resolve::run(&args, &store),
        Command::Timeline(args) => timeline::run(&args, &store),
        Command::Verify(args) => verify::run(&args, &store),
    }
}
