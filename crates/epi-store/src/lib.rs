#![deny(missing_docs)]

//! Content-addressed artifact store.
//!
//! Graph artifacts are named by the SHA-256 digest of their exact bytes, so a
//! stored file can always be checked against its own name. Evolution artifacts
//! are named `<first 8 hex of the graph uid>-<random token>.json`: repeated runs
//! over one graph never overwrite each other yet stay traceable to it. Every
//! artifact can be addressed by any unambiguous prefix of its name.

mod directory;
mod store;

pub use directory::ensure_directory;
pub use store::{
    compute_uid, load, resolve, save_evolution, save_graph, verify, ArtifactStore,
    GRAPH_UID_PREFIX_LEN,
};
