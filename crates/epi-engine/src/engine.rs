use std::collections::BTreeSet;

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::{Label, NodeState, RngHandle};
use epi_graph::Graph;
use serde::{Deserialize, Serialize};

use crate::params::ContagionParams;
use crate::trace::{RoundRecord, Trace};

/// Summary returned by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Propagation rounds executed (the trace holds one more record).
    pub rounds: usize,
    /// Whether the run stopped at the round ceiling with infectious nodes left.
    pub truncated: bool,
}

/// One-shot contagion run over a borrowed graph.
///
/// Node runtime is kept as parallel arrays indexed by the graph's dense node
/// index: `states[i]` is the compartment of node `i` and `state_end[i]` the
/// round at which that compartment expires (`None` when it is permanent).
#[derive(Debug)]
pub struct Evolution<'g> {
    graph: &'g Graph,
    params: ContagionParams,
    rng: RngHandle,
    states: Vec<NodeState>,
    state_end: Vec<Option<usize>>,
    infectious: usize,
    round: usize,
    trace: Trace,
    dropped: Vec<Label>,
    finished: bool,
}

impl<'g> Evolution<'g> {
    /// Validates the parameters, seeds the initial infectious set and records
    /// round 0.
    ///
    /// Initial labels that are not graph nodes are ignored and reported by
    /// [`Evolution::dropped`].
    pub fn new<I>(
        graph: &'g Graph,
        initial_infectious: I,
        params: ContagionParams,
        rng: RngHandle,
    ) -> Result<Self, EpiError>
    where
        I: IntoIterator<Item = Label>,
    {
        params.validate()?;
        let count = graph.node_count();
        let mut evolution = Self {
            graph,
            params,
            rng,
            states: vec![NodeState::Susceptible; count],
            state_end: vec![None; count],
            infectious: 0,
            round: 0,
            trace: Trace::default(),
            dropped: Vec::new(),
            finished: false,
        };
        let initial_end = params.infection_duration as usize;
        let mut dropped = BTreeSet::new();
        for label in initial_infectious {
            match graph.index_of(&label) {
                Some(idx) => {
                    if evolution.states[idx] != NodeState::Infectious {
                        evolution.states[idx] = NodeState::Infectious;
                        evolution.state_end[idx] = Some(initial_end);
                        evolution.infectious += 1;
                    }
                }
                None => {
                    dropped.insert(label);
                }
            }
        }
        evolution.dropped = dropped.into_iter().collect();
        evolution.record();
        Ok(evolution)
    }

    /// Runs rounds until no node is infectious.
    pub fn run(&mut self) -> Result<&Trace, EpiError> {
        self.run_bounded(None)?;
        Ok(&self.trace)
    }

    /// Runs rounds until no node is infectious or `max_rounds` rounds have been
    /// executed, whichever comes first.
    pub fn run_bounded(&mut self, max_rounds: Option<usize>) -> Result<RunOutcome, EpiError> {
        if self.finished {
            return Err(EpiError::AlreadyRun(
                ErrorInfo::new("already-run", "evolution has already been run")
                    .with_context("rounds", self.round.to_string())
                    .with_hint("construct a new evolution for another run"),
            ));
        }
        self.finished = true;
        let mut executed = 0usize;
        while self.infectious > 0 {
            if max_rounds.is_some_and(|limit| executed >= limit) {
                return Ok(RunOutcome {
                    rounds: executed,
                    truncated: true,
                });
            }
            self.step();
            executed += 1;
        }
        Ok(RunOutcome {
            rounds: executed,
            truncated: false,
        })
    }

    /// Executes one round: exposure over the settled states, then transition.
    fn step(&mut self) {
        let exposed = self.exposure();
        let current = self.round + 1;
        let infection_duration = self.params.infection_duration as usize;
        let recovery_duration = self.params.recovery_duration.map(|r| r as usize);

        for idx in 0..self.states.len() {
            let ends_now = self.state_end[idx] == Some(current);
            match self.states[idx] {
                NodeState::Susceptible if exposed[idx] => {
                    self.states[idx] = NodeState::Infectious;
                    self.state_end[idx] = Some(current + infection_duration);
                    self.infectious += 1;
                }
                NodeState::Infectious if ends_now => {
                    self.states[idx] = NodeState::Recovered;
                    self.state_end[idx] = recovery_duration.map(|r| current + r);
                    self.infectious -= 1;
                }
                NodeState::Recovered if recovery_duration.is_some() && ends_now => {
                    self.states[idx] = NodeState::Susceptible;
                    self.state_end[idx] = None;
                }
                _ => {}
            }
        }
        self.round = current;
        self.record();
    }

    /// One Bernoulli trial per (infectious, susceptible neighbour) adjacency.
    fn exposure(&mut self) -> Vec<bool> {
        let probability = self.params.contagion_probability;
        let mut exposed = vec![false; self.states.len()];
        for idx in 0..self.states.len() {
            if self.states[idx] != NodeState::Infectious {
                continue;
            }
            for &neighbor in self.graph.neighbors(idx) {
                if self.states[neighbor] == NodeState::Susceptible && self.rng.trial(probability)
                {
                    exposed[neighbor] = true;
                }
            }
        }
        exposed
    }

    fn record(&mut self) {
        let mut record = RoundRecord::default();
        for (idx, state) in self.states.iter().enumerate() {
            let Some(label) = self.graph.label(idx) else {
                continue;
            };
            match state {
                NodeState::Infectious => {
                    record.infectious.insert(label.clone());
                }
                NodeState::Recovered => {
                    record.recovered.insert(label.clone());
                }
                NodeState::Susceptible => {}
            }
        }
        self.trace.push(record);
    }

    /// Trace recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consumes the engine, returning its trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Index of the latest recorded round.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Current compartment of a node.
    pub fn state_of(&self, label: &Label) -> Option<NodeState> {
        self.graph
            .index_of(label)
            .and_then(|idx| self.states.get(idx).copied())
    }

    /// Round at which the node's current compartment expires.
    pub fn state_end_of(&self, label: &Label) -> Option<usize> {
        self.graph
            .index_of(label)
            .and_then(|idx| self.state_end.get(idx).copied().flatten())
    }

    /// Initial labels ignored because the graph does not contain them.
    pub fn dropped(&self) -> &[Label] {
        &self.dropped
    }

    /// Parameters of the run.
    pub fn params(&self) -> &ContagionParams {
        &self.params
    }

    /// Graph the run operates on.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
}
