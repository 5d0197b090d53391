#![deny(missing_docs)]
#![doc = "Core types shared by the contagion engine, the graph source and the artifact store."]

pub mod errors;
pub mod rng;
mod types;

pub use errors::{EpiError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{Label, NodeState};
