pub mod generate;
pub mod resolve;
pub mod save_graph;
pub mod simulate;
pub mod sweep;
pub mod timeline;
pub mod verify;

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Args;
use epi_core::Label;
use epi_engine::OutputConfig;
use epi_graph::{Graph, GraphFormat, NumericPolicy};
use epi_store::ArtifactStore;
use tracing::{debug, info, warn};

/// Artifact directories given on the command line.
#[derive(Debug, Clone, Default)]
pub struct StoreOpts {
    pub graphs_dir: Option<PathBuf>,
    pub evolutions_dir: Option<PathBuf>,
}

impl StoreOpts {
    /// Flag value, then configuration file, then default.
    pub fn graphs_dir(&self, output: &OutputConfig) -> PathBuf {
        self.graphs_dir
            .clone()
            .unwrap_or_else(|| output.graphs_dir.clone())
    }

    pub fn evolutions_dir(&self, output: &OutputConfig) -> PathBuf {
        self.evolutions_dir
            .clone()
            .unwrap_or_else(|| output.evolutions_dir.clone())
    }

    pub fn graphs(&self, output: &OutputConfig) -> Result<ArtifactStore, Box<dyn Error>> {
        Ok(ArtifactStore::open(self.graphs_dir(output))?)
    }

    pub fn evolutions(&self, output: &OutputConfig) -> Result<ArtifactStore, Box<dyn Error>> {
        Ok(ArtifactStore::open(self.evolutions_dir(output))?)
    }
}

/// Initial infectious nodes, listed inline or in a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SeedArgs {
    /// Comma or whitespace separated labels of the initially infectious nodes.
    #[arg(long, value_name = "LIST")]
    pub zero: Option<String>,
    /// File listing the initially infectious nodes.
    #[arg(long, value_name = "FILE")]
    pub zero_file: Option<PathBuf>,
}

impl SeedArgs {
    /// Maps every token to a graph label, warning about unknown ones.
    ///
    /// In a seed file everything after `#` on a line is a comment.
    pub fn labels(&self, graph: &Graph) -> Result<Vec<Label>, Box<dyn Error>> {
        let text = match (&self.zero, &self.zero_file) {
            (Some(list), _) => list.clone(),
            (None, Some(path)) => strip_comments(&fs::read_to_string(path)?),
            (None, None) => String::new(),
        };
        let mut labels = Vec::new();
        for token in text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            match graph.resolve_token(token) {
                Some(label) => labels.push(label.clone()),
                None => warn!(token, "initial node is not in the graph, ignoring"),
            }
        }
        Ok(labels)
    }
}

fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// How a graph argument is read and interpreted.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph file, `-` for stdin, or the UID prefix of a stored graph. An
    /// existing file takes precedence over a prefix.
    #[arg(value_name = "GRAPH")]
    pub graph: Option<String>,
    /// Read the graph as an edge list instead of an adjacency list.
    #[arg(long)]
    pub edges: bool,
    /// Numeric label coercion: never, auto, always.
    #[arg(long, value_name = "MODE")]
    pub numeric: Option<NumericPolicy>,
}

impl GraphArgs {
    pub fn format(&self) -> GraphFormat {
        if self.edges {
            GraphFormat::Edges
        } else {
            GraphFormat::Adjacency
        }
    }
}

/// A graph ready for simulation together with its stored UID.
pub struct LoadedGraph {
    pub uid: String,
    pub graph: Graph,
}

/// Reads a graph from a file, stdin or the store. Graphs read from outside
/// the store are saved first, so every run is keyed by a stored UID.
pub fn load_graph(
    source: Option<&str>,
    format: GraphFormat,
    numeric: NumericPolicy,
    graphs: &ArtifactStore,
) -> Result<LoadedGraph, Box<dyn Error>> {
    let (uid, bytes) = match source {
        None | Some("-") => {
            debug!("reading graph from stdin");
            let bytes = read_input(None)?;
            let uid = graphs.save_graph(&bytes)?;
            info!(uid = %uid, "graph saved from stdin");
            (uid, bytes)
        }
        Some(path) if Path::new(path).is_file() => {
            debug!(path, "reading graph from file, not as a uid prefix");
            let bytes = read_input(Some(Path::new(path)))?;
            let uid = graphs.save_graph(&bytes)?;
            info!(uid = %uid, path, "graph saved");
            (uid, bytes)
        }
        Some(prefix) => {
            debug!(prefix, "loading stored graph");
            graphs.load(prefix)?
        }
    };
    let text = String::from_utf8(bytes)?;
    let graph = numeric.apply(&format.parse(&text)?);
    Ok(LoadedGraph { uid, graph })
}

/// Reads a whole file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, Box<dyn Error>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read(path)?),
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}
