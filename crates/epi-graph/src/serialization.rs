use std::fmt::Write as _;
use std::str::FromStr;

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::Label;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphBuilder};

/// Text layout of a graph file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    /// One line per node: `node neighbor neighbor ...`.
    #[default]
    Adjacency,
    /// One edge per line: `u v [ignored data]`.
    Edges,
}

impl GraphFormat {
    /// Parses text in this format.
    pub fn parse(&self, text: &str) -> Result<Graph, EpiError> {
        match self {
            GraphFormat::Adjacency => parse_adjlist(text),
            GraphFormat::Edges => parse_edgelist(text),
        }
    }
}

impl FromStr for GraphFormat {
    type Err = EpiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "adjacency" | "adjlist" => Ok(GraphFormat::Adjacency),
            "edges" | "edgelist" => Ok(GraphFormat::Edges),
            other => Err(EpiError::InvalidParameter(
                ErrorInfo::new("graph-format", "unknown graph format")
                    .with_context("value", other),
            )),
        }
    }
}

/// Parses adjacency-list text. Every label is kept as text.
pub fn parse_adjlist(text: &str) -> Result<Graph, EpiError> {
    let mut builder = GraphBuilder::new();
    for (line_no, tokens) in content_lines(text) {
        let Some((head, rest)) = tokens.split_first() else {
            continue;
        };
        builder.add_node(Label::from(*head));
        for neighbor in rest {
            builder
                .add_edge(Label::from(*head), Label::from(*neighbor))
                .map_err(|err| at_line(err, line_no))?;
        }
    }
    Ok(builder.build())
}

/// Parses edge-list text. Tokens past the first two on a line are ignored.
pub fn parse_edgelist(text: &str) -> Result<Graph, EpiError> {
    let mut builder = GraphBuilder::new();
    for (line_no, tokens) in content_lines(text) {
        if tokens.len() < 2 {
            continue;
        }
        builder
            .add_edge(Label::from(tokens[0]), Label::from(tokens[1]))
            .map_err(|err| at_line(err, line_no))?;
    }
    Ok(builder.build())
}

/// Renders the canonical adjacency list of a graph.
///
/// Nodes appear in index order and each line only lists neighbours with a
/// higher index, so every edge is written exactly once.
pub fn to_adjlist(graph: &Graph) -> String {
    let mut out = String::new();
    for (idx, label) in graph.labels().iter().enumerate() {
        let _ = write!(out, "{label}");
        for &neighbor in graph.neighbors(idx) {
            if neighbor > idx {
                if let Some(other) = graph.label(neighbor) {
                    let _ = write!(out, " {other}");
                }
            }
        }
        out.push('\n');
    }
    out
}

fn content_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(idx, line)| {
        let content = line.split('#').next().unwrap_or("");
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            None
        } else {
            Some((idx + 1, tokens))
        }
    })
}

fn at_line(err: EpiError, line: usize) -> EpiError {
    match err {
        EpiError::Graph(info) => EpiError::Graph(info.with_context("line", line.to_string())),
        other => other,
    }
}
