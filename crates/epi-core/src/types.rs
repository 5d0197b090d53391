use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Label naming a node of a contact network.
///
/// Labels read from text start as [`Label::Text`]; numeric coercion turns the
/// ones that parse into [`Label::Int`]. The derived order sorts every integer
/// before every text label, which gives traces a stable total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Integer label.
    Int(i64),
    /// Free-form text label.
    Text(String),
}

impl Label {
    /// Returns the integer form of a text token, if it parses.
    pub fn parse_int(token: &str) -> Option<Self> {
        token.trim().parse::<i64>().ok().map(Label::Int)
    }

    /// Returns the integer value when the label is numeric.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(value) => Some(*value),
            Label::Text(_) => None,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(value) => write!(f, "{value}"),
            Label::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<usize> for Label {
    fn from(value: usize) -> Self {
        Label::Int(value as i64)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

/// Compartment a node occupies during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeState {
    /// Can be infected by an infectious neighbour.
    Susceptible,
    /// Spreads the contagion to susceptible neighbours.
    Infectious,
    /// Immune, either for a fixed number of rounds or permanently.
    Recovered,
}
