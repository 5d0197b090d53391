use std::fs;
use std::path::Path;

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::Label;
use serde::{Deserialize, Serialize};

use crate::engine::Evolution;
use crate::trace::{RoundRecord, Trace};

fn is_false(value: &bool) -> bool {
    !*value
}

/// JSON artifact describing one finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EvolutionRecord {
    /// UID of the graph the run operated on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_uid: Option<String>,
    /// Contagion probability of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Rounds spent infectious.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infection_duration: Option<u32>,
    /// Rounds of immunity, absent when recovery is permanent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_duration: Option<u32>,
    /// Seed of the random source, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Set when a round ceiling stopped the run early.
    #[serde(default, skip_serializing_if = "is_false")]
    pub truncated: bool,
    /// Graph nodes in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Label>,
    /// Round records; `rounds[0]` is the initial assignment.
    pub rounds: Vec<RoundRecord>,
}

impl EvolutionRecord {
    /// Captures the trace and parameters of a run.
    pub fn from_evolution(evolution: &Evolution<'_>) -> Self {
        let params = evolution.params();
        Self {
            graph_uid: None,
            probability: Some(params.contagion_probability),
            infection_duration: Some(params.infection_duration),
            recovery_duration: params.recovery_duration,
            seed: None,
            truncated: false,
            nodes: evolution.graph().labels().to_vec(),
            rounds: evolution.trace().rounds().to_vec(),
        }
    }

    /// Tags the record with the UID of its source graph.
    pub fn with_graph_uid(mut self, uid: impl Into<String>) -> Self {
        self.graph_uid = Some(uid.into());
        self
    }

    /// Records the seed that produced the run.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Marks the record as cut short by a round ceiling.
    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    /// Returns the rounds as a [`Trace`].
    pub fn trace(&self) -> Trace {
        Trace::from_rounds(self.rounds.clone())
    }

    /// Pretty JSON bytes, newline terminated. These are the bytes persisted.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, EpiError> {
        let mut bytes = serde_json::to_vec_pretty(self)
            .map_err(|err| EpiError::Serde(ErrorInfo::new("evolution-serialize", err.to_string())))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Parses an evolution artifact.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, EpiError> {
        serde_json::from_slice(bytes)
            .map_err(|err| EpiError::Serde(ErrorInfo::new("evolution-parse", err.to_string())))
    }

    /// Loads an evolution artifact from disk.
    pub fn load(path: &Path) -> Result<Self, EpiError> {
        let bytes = fs::read(path).map_err(|err| {
            EpiError::Io(
                ErrorInfo::new("evolution-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_json_slice(&bytes).map_err(|err| match err {
            EpiError::Serde(info) => {
                EpiError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }
}
