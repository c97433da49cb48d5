//! Parent relation validation
//!
//! Embedded tables point at their parent by name (configuration files) or by
//! handle (programmatic declaration). The relation must form a forest: no
//! self-references, no cycles, every parent known. Foreign keys add ordering
//! edges only: a referenced table has to be declared first.

use super::ValidationError;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Directed graph of `parent -> child` and `referenced -> referencing` edges
/// between table names
#[derive(Debug, Default)]
pub struct ParentGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
    parents: HashMap<String, String>,
}

impl ParentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, name: &str) -> Result<(), ValidationError> {
        if self.nodes.contains_key(name) {
            return Err(ValidationError::DuplicateTable {
                table: name.to_string(),
            });
        }
        let node = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), node);
        Ok(())
    }

    /// Record that `child` is embedded in `parent`. Both must already be added.
    pub fn add_parent(&mut self, child: &str, parent: &str) -> Result<(), ValidationError> {
        if child == parent {
            return Err(ValidationError::SelfReference {
                table: child.to_string(),
            });
        }
        let unknown = || ValidationError::UnknownParent {
            table: child.to_string(),
            parent: parent.to_string(),
        };
        let child_node = *self.nodes.get(child).ok_or_else(unknown)?;
        let parent_node = *self.nodes.get(parent).ok_or_else(unknown)?;

        self.graph.add_edge(parent_node, child_node, ());
        self.parents.insert(child.to_string(), parent.to_string());
        Ok(())
    }

    /// Record that `table` has a foreign key on `column` into `referenced`.
    pub fn add_reference(&mut self, table: &str, column: &str, referenced: &str) -> Result<(), ValidationError> {
        if table == referenced {
            return Err(ValidationError::SelfReference {
                table: table.to_string(),
            });
        }
        let table_node = *self.nodes.get(table).ok_or_else(|| ValidationError::Config(format!(
            "table '{}' is not part of the graph",
            table
        )))?;
        let referenced_node = *self.nodes.get(referenced).ok_or_else(|| ValidationError::UnknownReferencedTable {
            table: table.to_string(),
            column: column.to_string(),
        })?;

        self.graph.add_edge(referenced_node, table_node, ());
        Ok(())
    }

    /// Table names ordered so that every parent and referenced table precedes
    /// its dependents.
    pub fn topological_order(&self) -> Result<Vec<String>, ValidationError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().map(|n| self.graph[n].clone()).collect()),
            Err(cycle) => Err(ValidationError::CircularParent {
                cycle: self.cycle_through(&self.graph[cycle.node_id()]),
            }),
        }
    }

    // Each table has at most one parent, so following parents from a node on
    // a pure parent cycle walks exactly that cycle. Cycles that pass through a
    // foreign key are reported as their strongly connected component.
    fn cycle_through(&self, start: &str) -> Vec<String> {
        let mut cycle = vec![start.to_string()];
        let mut current = start;
        while let Some(parent) = self.parents.get(current) {
            if parent == start {
                cycle.push(start.to_string());
                return cycle;
            }
            if cycle.iter().any(|seen| seen == parent) {
                break;
            }
            cycle.push(parent.clone());
            current = parent;
        }

        let Some(&node) = self.nodes.get(start) else {
            return cycle;
        };
        match tarjan_scc(&self.graph).into_iter().find(|component| component.contains(&node)) {
            Some(component) => {
                let mut cycle = vec![start.to_string()];
                cycle.extend(
                    component
                        .iter()
                        .filter(|n| **n != node)
                        .map(|n| self.graph[*n].clone()),
                );
                cycle.push(start.to_string());
                cycle
            }
            None => cycle,
        }
    }
}
