//! Whole-manifest dependency graph using `petgraph`.
//!
//! Used to validate a registry up front. Planning itself does not go
//! through this graph; see [`crate::plan`].

use std::collections::{HashMap, HashSet};

use drmake_common::error::{DrmakeError, Result};
use petgraph::graph::{DiGraph, NodeIndex};

/// A directed graph of targets with edges pointing from a target to what
/// it needs first.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target node, returning the existing node if already present.
    pub fn add_target(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        let _ = self.nodes.insert(name.to_string(), idx);
        idx
    }

    /// Adds an edge: `dependent` needs `dependency` first.
    pub fn add_dependency(&mut self, dependent: &str, dependency: &str) {
        let from = self.add_target(dependent);
        let to = self.add_target(dependency);
        let _ = self.graph.update_edge(from, to, ());
    }

    /// Verifies that the graph has no cycle.
    ///
    /// # Errors
    ///
    /// Returns `DrmakeError::DependencyCycle` carrying one cycle, closed by
    /// its first name.
    pub fn check_acyclic(&self) -> Result<()> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(DrmakeError::DependencyCycle {
                chain: self.cycle_through(cycle.node_id()),
            }),
        }
    }

    /// Walks successors inside the strongly connected component of `start`
    /// until a node repeats.
    fn cycle_through(&self, start: NodeIndex) -> Vec<String> {
        let component: HashSet<NodeIndex> = petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .find(|scc| scc.contains(&start))
            .unwrap_or_default()
            .into_iter()
            .collect();

        let mut path = vec![start];
        let mut current = start;
        while let Some(next) = self
            .graph
            .neighbors(current)
            .find(|n| component.contains(n))
        {
            if let Some(pos) = path.iter().position(|&p| p == next) {
                path.push(next);
                let _ = path.drain(..pos);
                break;
            }
            path.push(next);
            current = next;
        }

        path.iter()
            .filter_map(|&idx| self.graph.node_weight(idx).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_is_acyclic() {
        assert!(DependencyGraph::new().check_acyclic().is_ok());
    }

    #[test]
    fn add_target_is_idempotent() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_target("a");
        assert_eq!(graph.add_target("a"), a);
    }

    #[test]
    fn diamond_is_acyclic() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("a", "c");
        graph.add_dependency("b", "d");
        graph.add_dependency("c", "d");
        assert!(graph.check_acyclic().is_ok());
    }

    #[test]
    fn two_node_cycle_reports_chain() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "a");

        let err = graph.check_acyclic().unwrap_err();
        let DrmakeError::DependencyCycle { chain } = err else {
            panic!("expected cycle, got {err}");
        };
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.first(), chain.last());
        assert!(chain.contains(&"a".to_string()));
        assert!(chain.contains(&"b".to_string()));
    }

    #[test]
    fn three_node_cycle_detection() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "c");
        graph.add_dependency("c", "a");
        graph.add_dependency("d", "a");

        let err = graph.check_acyclic().unwrap_err();
        let DrmakeError::DependencyCycle { chain } = err else {
            panic!("expected cycle, got {err}");
        };
        assert_eq!(chain.len(), 4);
        assert!(!chain.contains(&"d".to_string()), "got: {chain:?}");
    }
}
