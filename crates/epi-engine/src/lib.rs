#![deny(missing_docs)]

//! Discrete-time contagion over a fixed contact network.
//!
//! An [`Evolution`] drives every node through the susceptible, infectious and
//! recovered compartments one round at a time and records a [`Trace`] of
//! per-round membership. Runs are reproducible for a given seeded
//! [`RngHandle`](epi_core::RngHandle).

/// YAML run configuration and defaults.
pub mod config;
/// The propagation engine and its one-shot run entry points.
pub mod engine;
/// Model parameters and their validation.
pub mod params;
/// JSON evolution artifact.
pub mod record;
/// Terminal timeline rendering of a trace.
pub mod timeline;
/// Per-round compartment snapshots.
pub mod trace;

pub use config::{ModelConfig, OutputConfig, RunLimits, SeedPolicy, SimulationConfig};
pub use engine::{Evolution, RunOutcome};
pub use params::ContagionParams;
pub use record::EvolutionRecord;
pub use timeline::{render_timeline, Palette};
pub use trace::{RoundRecord, Trace};
