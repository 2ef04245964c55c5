//! Passes that remove predicates a data source cannot evaluate.
//!
//! Removing a conjunct only widens the result, so an `AND` may lose children.
//! Removing a disjunct narrows it, so an `OR` that lost a child is dropped whole.
//! Under an odd number of `NOT`s the two swap roles.

use model::filter::{
    node::{Node, OperatorNode},
    operator::Operator,
};
use std::cell::Cell;
use tracing::debug;

pub mod data_type;
pub mod operator;

pub use data_type::SupportedDataTypePruner;
pub use operator::SupportedOperatorPruner;

/// Restores a valid logical shape after children were removed. `negated`
/// tells whether the node sits under an odd number of `NOT`s.
pub(crate) fn repair_arity(mut node: OperatorNode, level: usize, negated: bool) -> Option<Node> {
    let effective = if negated { node.operator.dual() } else { node.operator };

    match (effective, node.child_count()) {
        (Operator::And, 1) => {
            let (left, right) = node.take_children();
            debug!(level, operator = %node.operator, "Promoting the only remaining child of AND");
            left.or(right)
        }
        (Operator::Or, count) if count <= 1 => {
            debug!(level, operator = %node.operator, remaining = count, "Dropping OR with a pruned child");
            None
        }
        (Operator::And | Operator::Not, 0) => {
            debug!(level, operator = %node.operator, "Dropping logical operator without children");
            None
        }
        _ => Some(Node::Operator(node)),
    }
}

/// Counts the `NOT`s enclosing the node a pruner is visiting.
#[derive(Debug, Clone, Default)]
pub(crate) struct Polarity {
    negations: Cell<usize>,
}

impl Polarity {
    pub(crate) fn enter(&self, node: &Node) {
        if node.operator() == Some(Operator::Not) {
            self.negations.set(self.negations.get() + 1);
        }
    }

    /// Leaves `node` and reports whether it is negated.
    pub(crate) fn leave(&self, node: &Node) -> bool {
        if node.operator() == Some(Operator::Not) {
            self.negations.set(self.negations.get().saturating_sub(1));
        }
        self.negations.get() % 2 == 1
    }
}
