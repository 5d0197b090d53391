use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::rng::RngHandle;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphBuilder};

/// Parametrised families of contact networks. Nodes are labelled `0..n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Template {
    /// Nodes connected in sequence, the last one back to the first.
    Cycle {
        /// Number of nodes.
        nodes: usize,
    },
    /// Every pair of nodes is an edge with the given probability.
    ErdosRenyi {
        /// Number of nodes.
        nodes: usize,
        /// Edge probability in `[0, 1]`.
        probability: f64,
    },
    /// Every node has exactly one neighbour.
    Matching {
        /// Number of nodes (even).
        nodes: usize,
    },
    /// Union of a cycle and an Erdős–Rényi graph.
    CycleErdosRenyi {
        /// Number of nodes.
        nodes: usize,
        /// Edge probability in `[0, 1]`.
        probability: f64,
    },
    /// Union of a cycle and a perfect matching.
    CycleMatching {
        /// Number of nodes (even).
        nodes: usize,
    },
    /// Two dimensional lattice wrapped along both axes.
    Torus {
        /// First dimension.
        columns: usize,
        /// Second dimension.
        rows: usize,
    },
    /// Union of a torus and an Erdős–Rényi graph.
    TorusErdosRenyi {
        /// First dimension.
        columns: usize,
        /// Second dimension.
        rows: usize,
        /// Edge probability in `[0, 1]`.
        probability: f64,
    },
    /// Union of a torus and a perfect matching.
    TorusMatching {
        /// First dimension.
        columns: usize,
        /// Second dimension.
        rows: usize,
    },
}

impl Template {
    /// Upper-case template name as shown on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Template::Cycle { .. } => "CYCLE",
            Template::ErdosRenyi { .. } => "ERDOS_RENYI",
            Template::Matching { .. } => "MATCHING",
            Template::CycleErdosRenyi { .. } => "CYCLE_U_ERDOS_RENYI",
            Template::CycleMatching { .. } => "CYCLE_U_MATCHING",
            Template::Torus { .. } => "TORUS",
            Template::TorusErdosRenyi { .. } => "TORUS_U_ERDOS_RENYI",
            Template::TorusMatching { .. } => "TORUS_U_MATCHING",
        }
    }

    /// Checks the template parameters.
    pub fn validate(&self) -> Result<(), EpiError> {
        match *self {
            Template::Cycle { .. } | Template::Torus { .. } => Ok(()),
            Template::ErdosRenyi { probability, .. }
            | Template::CycleErdosRenyi { probability, .. }
            | Template::TorusErdosRenyi { probability, .. } => {
                self.check_probability(probability)
            }
            Template::Matching { nodes } | Template::CycleMatching { nodes } => {
                self.check_even("nodes", nodes)
            }
            Template::TorusMatching { columns, rows } => {
                self.check_even("columns*rows", columns.saturating_mul(rows))
            }
        }
    }

    /// Validates the parameters and builds the graph.
    pub fn build(&self, rng: &mut RngHandle) -> Result<Graph, EpiError> {
        self.validate()?;
        let graph = match *self {
            Template::Cycle { nodes } => cycle(nodes)?,
            Template::ErdosRenyi { nodes, probability } => {
                erdos_renyi(nodes, probability, rng)?
            }
            Template::Matching { nodes } => matching(nodes, rng)?,
            Template::CycleErdosRenyi { nodes, probability } => {
                cycle(nodes)?.union(&erdos_renyi(nodes, probability, rng)?)
            }
            Template::CycleMatching { nodes } => cycle(nodes)?.union(&matching(nodes, rng)?),
            Template::Torus { columns, rows } => torus(columns, rows)?,
            Template::TorusErdosRenyi {
                columns,
                rows,
                probability,
            } => torus(columns, rows)?.union(&erdos_renyi(columns * rows, probability, rng)?),
            Template::TorusMatching { columns, rows } => {
                torus(columns, rows)?.union(&matching(columns * rows, rng)?)
            }
        };
        Ok(graph)
    }

    fn check_probability(&self, probability: f64) -> Result<(), EpiError> {
        if (0.0..=1.0).contains(&probability) {
            Ok(())
        } else {
            Err(self.invalid("probability", probability, "edges probability (float in [0,1])"))
        }
    }

    fn check_even(&self, name: &str, value: usize) -> Result<(), EpiError> {
        if value % 2 == 0 {
            Ok(())
        } else {
            Err(self.invalid(name, value, "number of nodes must be even"))
        }
    }

    fn invalid(&self, name: &str, value: impl ToString, help: &str) -> EpiError {
        EpiError::Graph(
            ErrorInfo::new("invalid-template", format!("{name} invalid value"))
                .with_context("template", self.name())
                .with_context("parameter", name)
                .with_context("value", value.to_string())
                .with_hint(help),
        )
    }
}

fn cycle(nodes: usize) -> Result<Graph, EpiError> {
    let mut builder = GraphBuilder::with_int_nodes(nodes);
    if nodes >= 2 {
        for idx in 0..nodes - 1 {
            builder.add_edge_index(idx, idx + 1)?;
        }
        if nodes > 2 {
            builder.add_edge_index(nodes - 1, 0)?;
        }
    }
    Ok(builder.build())
}

fn erdos_renyi(nodes: usize, probability: f64, rng: &mut RngHandle) -> Result<Graph, EpiError> {
    let mut builder = GraphBuilder::with_int_nodes(nodes);
    for u in 0..nodes {
        for v in (u + 1)..nodes {
            if rng.trial(probability) {
                builder.add_edge_index(u, v)?;
            }
        }
    }
    Ok(builder.build())
}

fn matching(nodes: usize, rng: &mut RngHandle) -> Result<Graph, EpiError> {
    let mut order: Vec<usize> = (0..nodes).collect();
    order.shuffle(rng);
    let mut builder = GraphBuilder::with_int_nodes(nodes);
    let (left, right) = order.split_at(nodes / 2);
    for (&u, &v) in left.iter().zip(right) {
        builder.add_edge_index(u, v)?;
    }
    Ok(builder.build())
}

fn torus(columns: usize, rows: usize) -> Result<Graph, EpiError> {
    let at = |i: usize, j: usize| i * rows + j;
    let mut builder = GraphBuilder::with_int_nodes(columns * rows);
    for i in 0..columns {
        for j in 0..rows {
            if i + 1 < columns {
                builder.add_edge_index(at(i, j), at(i + 1, j))?;
            } else if columns > 2 {
                builder.add_edge_index(at(i, j), at(0, j))?;
            }
            if j + 1 < rows {
                builder.add_edge_index(at(i, j), at(i, j + 1))?;
            } else if rows > 2 {
                builder.add_edge_index(at(i, j), at(i, 0))?;
            }
        }
    }
    Ok(builder.build())
}
