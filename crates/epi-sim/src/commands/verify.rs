use std::error::Error;

use clap::Args;
use epi_engine::OutputConfig;

use super::StoreOpts;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// UID prefix of the stored graph.
    pub prefix: String,
}

pub fn run(args: &VerifyArgs, store: &StoreOpts) -> Result<(), Box<dyn Error>> {
    let root = store.graphs_dir(&OutputConfig::default());
    let path = epi_store::resolve(&root, &args.prefix)?;
    if !epi_store::verify(&path)? {
        return Err(format!("graph {} does not match its UID", path.display()).into());
    }
    println!("graph {} verified", path.display());
    Ok(())
}
