//! Precedence graph construction and deterministic topological sort.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::OrderError;

/// A directed precedence graph over unit ids.
///
/// An edge `u -> v` means unit `u` must run before unit `v`. Rebuilt
/// from scratch for every resolution pass.
pub struct OrderGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl OrderGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Add a node for an id. If the id is already present, returns the
    /// existing index.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Add a precedence edge `from -> to`.
    ///
    /// Duplicate edges collapse: repeated `after(x)` markers, or an
    /// `after` on one unit matched by a `before` on the other, describe
    /// the same constraint once.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Kahn's algorithm with a lexicographic tie-break.
    ///
    /// The ready set is ordered by id, and a newly-freed node joins at
    /// its sorted position, so the next scheduled id is always the
    /// lexicographically least among all currently-available ones.
    /// This keeps the order of unconstrained units reproducible across
    /// runs instead of depending on traversal happenstance.
    pub fn topo_order(&self) -> Result<Vec<String>, OrderError> {
        let mut in_degree: HashMap<NodeIndex, usize> = HashMap::new();
        for idx in self.graph.node_indices() {
            let degree = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .count();
            in_degree.insert(idx, degree);
        }

        let mut ready: BTreeSet<&str> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx] == 0)
            .map(|idx| self.graph[idx].as_str())
            .collect();

        let mut order: Vec<String> = Vec::with_capacity(self.graph.node_count());
        while let Some(id) = ready.pop_first() {
            order.push(id.to_string());
            let idx = self.index[id];
            for succ in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                let degree = in_degree
                    .get_mut(&succ)
                    .ok_or_else(|| OrderError::InternalInvariant {
                        message: format!("successor of `{id}` missing from in-degree map"),
                    })?;
                *degree -= 1;
                if *degree == 0 {
                    ready.insert(self.graph[succ].as_str());
                }
            }
        }

        if order.len() < self.graph.node_count() {
            return Err(OrderError::CycleDetected {
                residual: self.residual_edges(&order),
            });
        }

        Ok(order)
    }

    /// Edges whose source was never scheduled: the constraints that
    /// cannot be satisfied, reported for diagnosis.
    fn residual_edges(&self, scheduled: &[String]) -> Vec<(String, String)> {
        let scheduled: HashSet<&str> = scheduled.iter().map(String::as_str).collect();
        let mut residual: Vec<(String, String)> = self
            .graph
            .edge_references()
            .filter(|e| !scheduled.contains(self.graph[e.source()].as_str()))
            .map(|e| {
                (
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                )
            })
            .collect();
        residual.sort();
        residual
    }
}

impl Default for OrderGraph {
    fn default() -> Self {
        Self::new()
    }
}
