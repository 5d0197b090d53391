#![deny(missing_docs)]

//! Contact networks consumed by the propagation engine.
//!
//! A [`Graph`] is an immutable undirected simple graph over [`Label`](epi_core::Label)s.
//! Node indices are dense (`0..node_count`) and follow first-appearance order,
//! which doubles as the deterministic display order. Graphs are built with a
//! [`GraphBuilder`], parsed from adjacency-list or edge-list text, or generated
//! from a [`Template`].

mod coerce;
mod generators;
mod graph;
mod serialization;

pub use coerce::NumericPolicy;
pub use generators::Template;
pub use graph::{Graph, GraphBuilder};
pub use serialization::{parse_adjlist, parse_edgelist, to_adjlist, GraphFormat};
