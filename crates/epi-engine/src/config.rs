use std::fs;
use std::path::{Path, PathBuf};

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::RngHandle;
use epi_graph::NumericPolicy;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::params::ContagionParams;

/// YAML-configurable settings for a single simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Compartmental model parameters.
    #[serde(default)]
    pub model: ModelConfig,
    /// Seed of the random source.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Optional round ceiling.
    #[serde(default)]
    pub limits: RunLimits,
    /// Artifact directories.
    #[serde(default)]
    pub output: OutputConfig,
    /// Numeric label coercion applied to parsed graphs.
    #[serde(default)]
    pub numeric: NumericPolicy,
}

impl SimulationConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, EpiError> {
        serde_yaml::from_str(text)
            .map_err(|err| EpiError::Serde(ErrorInfo::new("config-parse", err.to_string())))
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, EpiError> {
        let text = fs::read_to_string(path).map_err(|err| {
            EpiError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text).map_err(|err| match err {
            EpiError::Serde(info) => {
                EpiError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }
}

/// Model parameters as written in configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Per-contact infection probability.
    #[serde(default)]
    pub contagion_probability: f64,
    /// Rounds spent infectious.
    #[serde(default = "default_infection_duration")]
    pub infection_duration: u32,
    /// Rounds of immunity; omit for permanent recovery.
    #[serde(default)]
    pub recovery_duration: Option<u32>,
}

fn default_infection_duration() -> u32 {
    1
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            contagion_probability: 0.0,
            infection_duration: default_infection_duration(),
            recovery_duration: None,
        }
    }
}

impl ModelConfig {
    /// Validated engine parameters.
    pub fn to_params(&self) -> Result<ContagionParams, EpiError> {
        ContagionParams::new(
            self.contagion_probability,
            self.infection_duration,
            self.recovery_duration,
        )
    }
}

/// Seeding configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed; drawn from OS entropy when absent.
    #[serde(default)]
    pub master_seed: Option<u64>,
    /// Free-form run label, logged next to the resolved seed.
    #[serde(default)]
    pub label: Option<String>,
}

impl SeedPolicy {
    /// Resolves the seed to use, drawing one from OS entropy when unset, so
    /// every run can be replayed from the seed stored in its artifact.
    pub fn resolve(&self) -> u64 {
        self.master_seed
            .unwrap_or_else(|| RngHandle::from_entropy().next_u64())
    }
}

/// Round ceiling imposed on otherwise unbounded runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunLimits {
    /// Maximum number of propagation rounds.
    #[serde(default)]
    pub max_rounds: Option<usize>,
}

/// Artifact directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory holding graph artifacts.
    #[serde(default = "default_graphs_dir")]
    pub graphs_dir: PathBuf,
    /// Directory holding evolution artifacts.
    #[serde(default = "default_evolutions_dir")]
    pub evolutions_dir: PathBuf,
}

fn default_graphs_dir() -> PathBuf {
    PathBuf::from("graphs")
}

fn default_evolutions_dir() -> PathBuf {
    PathBuf::from("evolutions")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graphs_dir: default_graphs_dir(),
            evolutions_dir: default_evolutions_dir(),
        }
    }
}
