//! Rewrites comparisons against fixed-width `CHAR(n)` columns.
//!
//! The query engine compares `BPCHAR` values ignoring trailing blanks, while
//! external sources store them either padded to the declared width or trimmed.
//! A comparison `c = 'ab'` on a `CHAR(5)` column therefore becomes
//! `(c = 'ab' OR c = 'ab   ')`, and a literal with trailing blanks also gets a
//! trimmed alternative. `<>` combines the alternatives with `AND` instead.

use crate::traverse::TreeVisitor;
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::{
        node::{ColumnIndexOperand, Node, OperandNode, OperatorNode, ScalarOperand},
        operator::Operator,
    },
};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct BpCharTransformer<'c> {
    columns: &'c [ColumnDescriptor],
}

impl<'c> BpCharTransformer<'c> {
    pub fn new(columns: &'c [ColumnDescriptor]) -> Self {
        Self { columns }
    }

    fn width(&self, column: &ColumnIndexOperand) -> Option<usize> {
        self.columns
            .get(column.index)
            .and_then(ColumnDescriptor::width)
    }
}

impl TreeVisitor for BpCharTransformer<'_> {
    fn after(&self, node: Node, _level: usize) -> Option<Node> {
        let Some(operator) = node.as_operator() else {
            return Some(node);
        };
        if operator.operator.is_logical() {
            return Some(node);
        }

        let (Some(column), Some(OperandNode::Scalar(scalar))) =
            (operator.column_index_operand(), operator.value_operand())
        else {
            return Some(node);
        };
        if scalar.data_type != DataType::Bpchar {
            return Some(node);
        }

        let value = scalar.value.as_str();
        let padded = self
            .width(column)
            .filter(|width| value.chars().count() < *width)
            .map(|width| format!("{value:<width$}"));
        let trimmed = value
            .ends_with(' ')
            .then(|| value.trim_end().to_string());

        if padded.is_none() && trimmed.is_none() {
            return Some(node);
        }

        let comparison = operator.operator;
        let column = column.clone();
        let logical = if comparison == Operator::NotEquals {
            Operator::And
        } else {
            Operator::Or
        };

        debug!(
            column = column.index,
            padded = padded.is_some(),
            trimmed = trimmed.is_some(),
            "Expanding BPCHAR comparison"
        );

        let mut result = node;
        for alternative in [padded, trimmed].into_iter().flatten() {
            let right = OperatorNode {
                operator: comparison,
                left: Some(Box::new(Node::Operand(OperandNode::ColumnIndex(column.clone())))),
                right: Some(Box::new(Node::Operand(OperandNode::Scalar(ScalarOperand::new(
                    DataType::Bpchar,
                    alternative,
                ))))),
            };
            result = Node::Operator(OperatorNode {
                operator: logical,
                left: Some(Box::new(result)),
                right: Some(Box::new(Node::Operator(right))),
            });
        }

        Some(result)
    }
}
