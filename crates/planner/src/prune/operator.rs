use super::{Polarity, repair_arity};
use crate::traverse::TreeVisitor;
use model::filter::{node::Node, operator::OperatorSet};
use tracing::debug;

/// Drops every node whose operator is outside `supported`, then repairs the
/// enclosing logical operators so the pruned predicate is never narrower
/// than the original.
#[derive(Debug, Clone)]
pub struct SupportedOperatorPruner {
    supported: OperatorSet,
    polarity: Polarity,
}

impl SupportedOperatorPruner {
    pub fn new(supported: OperatorSet) -> Self {
        Self {
            supported,
            polarity: Polarity::default(),
        }
    }
}

impl TreeVisitor for SupportedOperatorPruner {
    fn before(&self, node: Node, _level: usize) -> Option<Node> {
        self.polarity.enter(&node);
        Some(node)
    }

    fn after(&self, node: Node, level: usize) -> Option<Node> {
        let negated = self.polarity.leave(&node);
        let Node::Operator(operator) = node else {
            return Some(node);
        };

        if !self.supported.supports(operator.operator) {
            debug!(level, operator = %operator.operator, "Operator is not supported, pruning");
            return None;
        }

        repair_arity(operator, level, negated)
    }
}
