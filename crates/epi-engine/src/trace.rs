use std::collections::BTreeSet;

use epi_core::{Label, NodeState};
use epi_graph::Graph;
use serde::{Deserialize, Serialize};

/// Non-susceptible membership at one round. Susceptible nodes are implied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Nodes infectious during the round.
    pub infectious: BTreeSet<Label>,
    /// Nodes recovered during the round.
    pub recovered: BTreeSet<Label>,
}

impl RoundRecord {
    /// Compartment of a node in this round.
    pub fn state_of(&self, label: &Label) -> NodeState {
        if self.infectious.contains(label) {
            NodeState::Infectious
        } else if self.recovered.contains(label) {
            NodeState::Recovered
        } else {
            NodeState::Susceptible
        }
    }
}

/// Ordered history of round records, starting with the initial assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    rounds: Vec<RoundRecord>,
}

impl Trace {
    /// Wraps rounds read back from an evolution artifact.
    pub fn from_rounds(rounds: Vec<RoundRecord>) -> Self {
        Self { rounds }
    }

    pub(crate) fn push(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    /// All recorded rounds; index `k` is round `k`.
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Number of recorded rounds, round 0 included.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Returns whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Round record at index `k`.
    pub fn get(&self, k: usize) -> Option<&RoundRecord> {
        self.rounds.get(k)
    }

    /// Latest round record.
    pub fn last(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    /// Nodes infectious in at least one round.
    pub fn ever_infected(&self) -> BTreeSet<Label> {
        self.rounds
            .iter()
            .flat_map(|round| round.infectious.iter().cloned())
            .collect()
    }

    /// Largest infectious compartment across all rounds.
    pub fn peak_infectious(&self) -> usize {
        self.rounds
            .iter()
            .map(|round| round.infectious.len())
            .max()
            .unwrap_or(0)
    }

    /// Susceptible nodes at round `k`, in graph display order.
    pub fn susceptible_at(&self, k: usize, graph: &Graph) -> Option<Vec<Label>> {
        let round = self.rounds.get(k)?;
        Some(
            graph
                .labels()
                .iter()
                .filter(|label| round.state_of(label) == NodeState::Susceptible)
                .cloned()
                .collect(),
        )
    }
}
