use std::collections::BTreeSet;
use std::str::FromStr;

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::Label;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// Policy for turning text labels that look like integers into integer labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPolicy {
    /// Keep every label as text.
    Never,
    /// Convert all labels, or none of them when any label fails to parse.
    #[default]
    Auto,
    /// Convert every label that parses; keep the rest as text.
    Always,
}

impl NumericPolicy {
    /// Applies the policy, returning the relabelled graph.
    ///
    /// Two labels that would map onto the same integer (`"7"` and `"07"`) count
    /// as a failed conversion: `Auto` then keeps everything as text and `Always`
    /// keeps the later label as text.
    pub fn apply(&self, graph: &Graph) -> Graph {
        match self {
            NumericPolicy::Never => graph.clone(),
            NumericPolicy::Always => graph.relabel(to_int),
            NumericPolicy::Auto => {
                let mut seen = BTreeSet::new();
                let convertible = graph.labels().iter().all(|label| match to_int(label) {
                    Label::Int(value) => seen.insert(value),
                    Label::Text(_) => false,
                });
                if convertible {
                    graph.relabel(to_int)
                } else {
                    graph.clone()
                }
            }
        }
    }
}

fn to_int(label: &Label) -> Label {
    match label {
        Label::Int(_) => label.clone(),
        Label::Text(text) => Label::parse_int(text).unwrap_or_else(|| label.clone()),
    }
}

impl FromStr for NumericPolicy {
    type Err = EpiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "never" => Ok(NumericPolicy::Never),
            "auto" => Ok(NumericPolicy::Auto),
            "always" => Ok(NumericPolicy::Always),
            other => Err(EpiError::InvalidParameter(
                ErrorInfo::new("numeric-policy", "unknown numeric policy")
                    .with_context("value", other)
                    .with_hint("use one of never, auto, always"),
            )),
        }
    }
}
