use std::collections::{BTreeMap, BTreeSet, VecDeque};

use epi_core::errors::{EpiError, ErrorInfo};
use epi_core::Label;

/// Incremental builder for [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    labels: Vec<Label>,
    index: BTreeMap<Label, usize>,
    adjacency: Vec<BTreeSet<usize>>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder holding the integer nodes `0..count`.
    pub fn with_int_nodes(count: usize) -> Self {
        let mut builder = Self::new();
        for label in 0..count {
            builder.add_node(Label::from(label));
        }
        builder
    }

    /// Adds a node, returning its dense index. Existing labels keep their index.
    pub fn add_node(&mut self, label: Label) -> usize {
        if let Some(&idx) = self.index.get(&label) {
            return idx;
        }
        let idx = self.labels.len();
        self.index.insert(label.clone(), idx);
        self.labels.push(label);
        self.adjacency.push(BTreeSet::new());
        idx
    }

    /// Adds an undirected edge between two labels, creating missing endpoints.
    ///
    /// Duplicate edges collapse. Self-loops are rejected.
    pub fn add_edge(&mut self, a: Label, b: Label) -> Result<(), EpiError> {
        if a == b {
            return Err(EpiError::Graph(
                ErrorInfo::new("self-loop", "contact networks cannot contain self-loops")
                    .with_context("node", a.to_string()),
            ));
        }
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        self.link(ia, ib);
        Ok(())
    }

    /// Adds an undirected edge between two existing node indices.
    pub fn add_edge_index(&mut self, a: usize, b: usize) -> Result<(), EpiError> {
        let count = self.labels.len();
        if a >= count || b >= count {
            return Err(EpiError::Graph(
                ErrorInfo::new("unknown-node", "edge endpoint is not a node")
                    .with_context("endpoint", a.max(b).to_string())
                    .with_context("nodes", count.to_string()),
            ));
        }
        if a == b {
            return Err(EpiError::Graph(
                ErrorInfo::new("self-loop", "contact networks cannot contain self-loops")
                    .with_context("node", self.labels[a].to_string()),
            ));
        }
        self.link(a, b);
        Ok(())
    }

    fn link(&mut self, a: usize, b: usize) {
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    /// Number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Freezes the builder into an immutable graph.
    pub fn build(self) -> Graph {
        let adjacency: Vec<Vec<usize>> = self
            .adjacency
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();
        let edge_count = adjacency.iter().map(Vec::len).sum::<usize>() / 2;
        Graph {
            labels: self.labels,
            index: self.index,
            adjacency,
            edge_count,
        }
    }
}

/// Immutable undirected simple graph with labelled nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<Label>,
    index: BTreeMap<Label, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Node labels in display order; position `i` is the label of index `i`.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the label stored at the given index.
    pub fn label(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Returns the dense index of a label.
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Returns whether the label names a node of the graph.
    pub fn contains(&self, label: &Label) -> bool {
        self.index.contains_key(label)
    }

    /// Neighbour indices of a node in ascending order. Unknown indices have none.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Degree of a node.
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    /// Iterates over every edge once as `(lower, higher)` index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, nbrs)| {
            nbrs.iter()
                .copied()
                .filter(move |&v| v > u)
                .map(move |v| (u, v))
        })
    }

    /// Maps a raw token (from a seed list or the command line) to a node label.
    ///
    /// Text labels match verbatim; otherwise the token is tried as an integer, so
    /// seeds keep working whatever numeric policy built the graph.
    pub fn resolve_token(&self, token: &str) -> Option<&Label> {
        let token = token.trim();
        let text = Label::Text(token.to_string());
        if let Some(&idx) = self.index.get(&text) {
            return self.labels.get(idx);
        }
        let numeric = Label::parse_int(token)?;
        self.index.get(&numeric).and_then(|&idx| self.labels.get(idx))
    }

    /// Returns the union of two graphs: this graph's nodes first, then new nodes
    /// of `other`, with duplicate edges collapsed.
    pub fn union(&self, other: &Graph) -> Graph {
        let mut builder = self.to_builder();
        for label in other.labels() {
            builder.add_node(label.clone());
        }
        for (u, v) in other.edges() {
            let a = builder.add_node(other.labels[u].clone());
            let b = builder.add_node(other.labels[v].clone());
            builder.link(a, b);
        }
        builder.build()
    }

    /// Returns a copy of the graph with every label passed through `map`.
    ///
    /// Labels that would collide with an earlier label are kept unchanged.
    pub fn relabel(&self, mut map: impl FnMut(&Label) -> Label) -> Graph {
        let mut taken: BTreeSet<Label> = BTreeSet::new();
        let renamed: Vec<Label> = self
            .labels
            .iter()
            .map(|label| {
                let candidate = map(label);
                if taken.insert(candidate.clone()) {
                    candidate
                } else {
                    taken.insert(label.clone());
                    label.clone()
                }
            })
            .collect();
        let index = renamed
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.clone(), idx))
            .collect();
        Graph {
            labels: renamed,
            index,
            adjacency: self.adjacency.clone(),
            edge_count: self.edge_count,
        }
    }

    /// Returns whether every node can reach every other node.
    pub fn is_connected(&self) -> bool {
        if self.labels.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        let mut reached = 1usize;
        while let Some(node) = queue.pop_front() {
            for &next in self.neighbors(node) {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.labels.len()
    }

    fn to_builder(&self) -> GraphBuilder {
        GraphBuilder {
            labels: self.labels.clone(),
            index: self.index.clone(),
            adjacency: self
                .adjacency
                .iter()
                .map(|nbrs| nbrs.iter().copied().collect())
                .collect(),
        }
    }
}
