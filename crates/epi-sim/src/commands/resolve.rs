use std::error::Error;

use clap::{Args, ValueEnum};
use epi_engine::OutputConfig;

use super::StoreOpts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArtifactKind {
    Graphs,
    Evolutions,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Artifact directory to search.
    #[arg(value_enum)]
    pub kind: ArtifactKind,
    /// Full UID or unambiguous prefix.
    pub prefix: String,
}

pub fn run(args: &ResolveArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let output = OutputConfig::default();
    let root = match args.kind {
        ArtifactKind::Graphs => store.graphs_dir(&output),
        ArtifactKind::Evolutions => store.evolutions_dir(&output),
    };
    let path = epi_store::resolve(&root, &args.prefix)?;
    println!("{}", path.display());
    Ok(())
}
