//! Diagnostic views of a tree
//!
//! `Display` renders `[V=.., Q0=.., Q1=..]`; the alternate flag (`{:#}`)
//! nests the summary of every child instead of its Q value. `TreeSummary`
//! is the same information as a serializable struct for JSON output.

use std::fmt;

use serde::Serialize;

use crate::mcts::node::UctNode;

fn write_value(f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => write!(f, "{v:.4}"),
        None => write!(f, "-"),
    }
}

impl<R> fmt::Display for UctNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[V=")?;
        write_value(f, self.mean_value())?;
        for (k, child) in self.children().iter().enumerate() {
            if f.alternate() {
                write!(f, ", {k}:{child:#}")?;
            } else {
                write!(f, ", Q{k}=")?;
                write_value(f, child.mean_value())?;
            }
        }
        write!(f, "]")
    }
}

/// Statistics of one root action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildSummary {
    pub action: usize,
    pub visits: u64,
    pub q_value: Option<f64>,
}

/// Serializable snapshot of a node and its immediate children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSummary {
    pub visits: u64,
    pub value: Option<f64>,
    pub nodes: usize,
    pub depth: usize,
    pub children: Vec<ChildSummary>,
}

impl TreeSummary {
    pub fn of<R>(node: &UctNode<R>) -> Self {
        Self {
            visits: node.visit_count(),
            value: node.mean_value(),
            nodes: node.num_of_nodes(),
            depth: node.depth(),
            children: node
                .children()
                .iter()
                .enumerate()
                .map(|(action, child)| ChildSummary {
                    action,
                    visits: child.visit_count(),
                    q_value: child.mean_value(),
                })
                .collect(),
        }
    }
}
