//! Depth-first rewriting of expression trees.
//!
//! A [`TreeVisitor`] sees every node three times: `before` its children,
//! `visit` between the left and right child, and `after` both children were
//! rewritten. Each hook takes the node by value and returns its replacement;
//! returning `None` removes the node (and whatever it still holds) from the tree.

use crate::error::PlanError;
use model::filter::node::Node;

pub trait TreeVisitor {
    fn before(&self, node: Node, _level: usize) -> Option<Node> {
        Some(node)
    }

    fn visit(&self, node: Node, _level: usize) -> Option<Node> {
        Some(node)
    }

    fn after(&self, node: Node, _level: usize) -> Option<Node> {
        Some(node)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TreeTraverser;

impl TreeTraverser {
    pub fn new() -> Self {
        Self
    }

    /// Runs each visitor as a full pass, in order, feeding it the previous pass's result.
    pub fn traverse(
        &self,
        root: Node,
        visitors: &[&dyn TreeVisitor],
    ) -> Result<Option<Node>, PlanError> {
        if visitors.is_empty() {
            return Err(PlanError::NoVisitors);
        }

        let mut current = Some(root);
        for visitor in visitors {
            current = match current {
                Some(node) => traverse_node(node, *visitor, 0),
                None => break,
            };
        }
        Ok(current)
    }
}

fn traverse_node(node: Node, visitor: &dyn TreeVisitor, level: usize) -> Option<Node> {
    let node = visitor.before(node, level)?;

    let Node::Operator(mut operator) = node else {
        let node = visitor.visit(node, level)?;
        return visitor.after(node, level);
    };

    operator.left = operator
        .left
        .take()
        .and_then(|left| traverse_node(*left, visitor, level + 1))
        .map(Box::new);

    let node = visitor.visit(Node::Operator(operator), level)?;

    let node = match node {
        Node::Operator(mut operator) => {
            operator.right = operator
                .right
                .take()
                .and_then(|right| traverse_node(*right, visitor, level + 1))
                .map(Box::new);
            Node::Operator(operator)
        }
        operand => operand,
    };

    visitor.after(node, level)
}
