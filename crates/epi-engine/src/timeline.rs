use std::fmt::Write as _;

use epi_core::{Label, NodeState};

use crate::trace::Trace;

/// Glyph table used to draw one cell per node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Coloured asterisks for ANSI terminals.
    Ansi,
    /// Plain letters (`S`, `I`, `R`).
    Plain,
}

impl Palette {
    /// Cell drawn for a compartment.
    pub fn glyph(&self, state: NodeState) -> &'static str {
        match (self, state) {
            (Palette::Ansi, NodeState::Susceptible) => "\x1b[1;34m*\x1b[0m",
            (Palette::Ansi, NodeState::Infectious) => "\x1b[1;31m*\x1b[0m",
            (Palette::Ansi, NodeState::Recovered) => "\x1b[1;32m*\x1b[0m",
            (Palette::Plain, NodeState::Susceptible) => "S",
            (Palette::Plain, NodeState::Infectious) => "I",
            (Palette::Plain, NodeState::Recovered) => "R",
        }
    }
}

/// Renders one line per round: a right-aligned round index followed by one
/// cell per node in the given order.
pub fn render_timeline(nodes: &[Label], trace: &Trace, palette: Palette) -> String {
    let width = trace.len().saturating_sub(1).to_string().len();
    let mut out = String::new();
    for (idx, round) in trace.rounds().iter().enumerate() {
        let _ = write!(out, "[{idx:>width$}] ");
        for label in nodes {
            out.push_str(palette.glyph(round.state_of(label)));
        }
        out.push('\n');
    }
    out
}
