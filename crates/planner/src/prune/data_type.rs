use super::{Polarity, repair_arity};
use crate::traverse::TreeVisitor;
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::node::Node,
};
use std::collections::HashSet;
use tracing::debug;

/// Drops comparisons on columns whose declared type is outside `supported`,
/// with the same arity repair as [`SupportedOperatorPruner`](super::SupportedOperatorPruner).
#[derive(Debug, Clone)]
pub struct SupportedDataTypePruner<'c> {
    columns: &'c [ColumnDescriptor],
    supported: HashSet<DataType>,
    polarity: Polarity,
}

impl<'c> SupportedDataTypePruner<'c> {
    pub fn new(columns: &'c [ColumnDescriptor], supported: HashSet<DataType>) -> Self {
        Self {
            columns,
            supported,
            polarity: Polarity::default(),
        }
    }

    fn column_type(&self, index: usize) -> Option<DataType> {
        self.columns.get(index).map(|column| column.data_type)
    }
}

impl TreeVisitor for SupportedDataTypePruner<'_> {
    fn before(&self, node: Node, _level: usize) -> Option<Node> {
        self.polarity.enter(&node);
        Some(node)
    }

    fn after(&self, node: Node, level: usize) -> Option<Node> {
        let negated = self.polarity.leave(&node);
        let Node::Operator(operator) = node else {
            return Some(node);
        };

        if operator.operator.is_logical() {
            return repair_arity(operator, level, negated);
        }

        let data_type = operator
            .column_index_operand()
            .and_then(|column| self.column_type(column.index));

        match data_type {
            Some(data_type) if self.supported.contains(&data_type) => Some(Node::Operator(operator)),
            other => {
                debug!(level, data_type = ?other, "Column type is not supported, pruning");
                None
            }
        }
    }
}
