use std::fs;
use std::path::Path;

use epi_core::errors::{EpiError, ErrorInfo};
use epi_engine::ContagionParams;
use serde::{Deserialize, Serialize};

/// Contagion probabilities visited by a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbabilityAxis {
    /// Explicit values, visited in order.
    List(Vec<f64>),
    /// `steps` evenly spaced values from `start` to `stop` inclusive.
    Grid { start: f64, stop: f64, steps: usize },
}

impl ProbabilityAxis {
    /// Expands the axis into concrete values.
    pub fn values(&self) -> Vec<f64> {
        match *self {
            ProbabilityAxis::List(ref values) => values.clone(),
            ProbabilityAxis::Grid { start, stop, steps } => match steps {
                0 => Vec::new(),
                1 => vec![start],
                _ => {
                    let step = (stop - start) / (steps - 1) as f64;
                    (0..steps)
                        .map(|idx| if idx + 1 == steps { stop } else { start + step * idx as f64 })
                        .collect()
                }
            },
        }
    }
}

/// YAML plan describing a probability sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    pub probabilities: ProbabilityAxis,
    #[serde(default = "SweepPlan::default_repeats")]
    pub repeats: usize,
    #[serde(default = "SweepPlan::default_infection_duration")]
    pub infection_duration: u32,
    #[serde(default)]
    pub recovery_duration: Option<u32>,
    #[serde(default)]
    pub master_seed: Option<u64>,
    #[serde(default = "SweepPlan::default_parallelism")]
    pub parallelism: usize,
    #[serde(default)]
    pub max_rounds: Option<usize>,
}

impl SweepPlan {
    const fn default_repeats() -> usize {
        1
    }

    const fn default_infection_duration() -> u32 {
        1
    }

    const fn default_parallelism() -> usize {
        1
    }

    /// Plan over explicit probabilities with every other field defaulted.
    pub fn over(probabilities: Vec<f64>) -> Self {
        Self {
            probabilities: ProbabilityAxis::List(probabilities),
            repeats: Self::default_repeats(),
            infection_duration: Self::default_infection_duration(),
            recovery_duration: None,
            master_seed: None,
            parallelism: Self::default_parallelism(),
            max_rounds: None,
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, EpiError> {
        serde_yaml::from_str(text)
            .map_err(|err| EpiError::Serde(ErrorInfo::new("plan-parse", err.to_string())))
    }

    pub fn load(path: &Path) -> Result<Self, EpiError> {
        let text = fs::read_to_string(path).map_err(|err| {
            EpiError::Io(
                ErrorInfo::new("plan-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Validated model parameters, one per probability, in axis order.
    pub fn params(&self) -> Result<Vec<ContagionParams>, EpiError> {
        if self.repeats == 0 {
            return Err(EpiError::invalid_parameter("repeats", 0, "at least 1"));
        }
        let values = self.probabilities.values();
        if values.is_empty() {
            return Err(EpiError::invalid_parameter(
                "probabilities",
                "[]",
                "a non-empty list",
            ));
        }
        values
            .into_iter()
            .map(|p| ContagionParams::new(p, self.infection_duration, self.recovery_duration))
            .collect()
    }
}
