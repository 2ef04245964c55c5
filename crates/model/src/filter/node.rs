//! Expression tree produced by the filter parser and rewritten by the planner passes.
//!
//! A [`Node`] is either an [`OperatorNode`] with up to two children or an
//! [`OperandNode`] leaf. Comparisons always keep the column reference on the
//! left and the literal on the right. Unary operators only use `left`.

use super::{error::FilterShapeError, operator::Operator};
use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Operator(OperatorNode),
    Operand(OperandNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorNode {
    pub operator: Operator,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperandNode {
    ColumnIndex(ColumnIndexOperand),
    Scalar(ScalarOperand),
    Collection(CollectionOperand),
}

/// Reference to a column by its ordinal in the request's column list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnIndexOperand {
    pub index: usize,
    /// Declared type of the column, when column metadata was available at parse time.
    pub data_type: Option<DataType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarOperand {
    pub data_type: DataType,
    pub value: String,
}

/// Right operand of `IN`: an array type and its element literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOperand {
    pub data_type: DataType,
    pub values: Vec<String>,
}

impl ColumnIndexOperand {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            data_type: None,
        }
    }

    pub fn typed(index: usize, data_type: DataType) -> Self {
        Self {
            index,
            data_type: Some(data_type),
        }
    }
}

impl ScalarOperand {
    pub fn new(data_type: DataType, value: impl Into<String>) -> Self {
        Self {
            data_type,
            value: value.into(),
        }
    }
}

impl CollectionOperand {
    pub fn new(data_type: DataType, values: Vec<String>) -> Self {
        Self { data_type, values }
    }
}

impl OperatorNode {
    /// Builds an operator node, checking the children against the operator's arity.
    ///
    /// Unary operators (`NOT`, `IS NULL`, `IS NOT NULL`) accept exactly one
    /// child in `left`; every other operator takes two.
    pub fn new(
        operator: Operator,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Result<Self, FilterShapeError> {
        let found = usize::from(left.is_some()) + usize::from(right.is_some());
        let shape_ok = if operator.is_unary() {
            left.is_some() && right.is_none()
        } else {
            found == 2
        };

        if !shape_ok {
            return Err(FilterShapeError::Arity {
                operator,
                expected: operator.arity(),
                found,
            });
        }

        Ok(Self {
            operator,
            left: left.map(Box::new),
            right: right.map(Box::new),
        })
    }

    /// Number of children still attached, which drops as passes prune them.
    pub fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    pub fn column_index_operand(&self) -> Option<&ColumnIndexOperand> {
        match self.left.as_deref() {
            Some(Node::Operand(OperandNode::ColumnIndex(column))) => Some(column),
            _ => None,
        }
    }

    /// The scalar or collection literal on the right, if there is one.
    pub fn value_operand(&self) -> Option<&OperandNode> {
        match self.right.as_deref() {
            Some(Node::Operand(
                operand @ (OperandNode::Scalar(_) | OperandNode::Collection(_)),
            )) => Some(operand),
            _ => None,
        }
    }

    /// Detaches both children, leaving the node empty.
    pub fn take_children(&mut self) -> (Option<Node>, Option<Node>) {
        (
            self.left.take().map(|node| *node),
            self.right.take().map(|node| *node),
        )
    }
}

impl Node {
    pub fn and(left: Node, right: Node) -> Node {
        Node::logical_pair(Operator::And, left, right)
    }

    pub fn or(left: Node, right: Node) -> Node {
        Node::logical_pair(Operator::Or, left, right)
    }

    pub fn not(child: Node) -> Node {
        Node::Operator(OperatorNode {
            operator: Operator::Not,
            left: Some(Box::new(child)),
            right: None,
        })
    }

    /// `column <op> value` for any binary comparison, including `NOOP` and `IN`.
    pub fn comparison(
        operator: Operator,
        column: ColumnIndexOperand,
        value: OperandNode,
    ) -> Result<Node, FilterShapeError> {
        if operator.is_logical() || operator.is_unary() {
            return Err(FilterShapeError::MisplacedOperator(operator));
        }
        Ok(Node::Operator(OperatorNode {
            operator,
            left: Some(Box::new(Node::Operand(OperandNode::ColumnIndex(column)))),
            right: Some(Box::new(Node::Operand(value))),
        }))
    }

    pub fn null_check(
        operator: Operator,
        column: ColumnIndexOperand,
    ) -> Result<Node, FilterShapeError> {
        if !matches!(operator, Operator::IsNull | Operator::IsNotNull) {
            return Err(FilterShapeError::MisplacedOperator(operator));
        }
        Ok(Node::Operator(OperatorNode {
            operator,
            left: Some(Box::new(Node::Operand(OperandNode::ColumnIndex(column)))),
            right: None,
        }))
    }

    fn logical_pair(operator: Operator, left: Node, right: Node) -> Node {
        Node::Operator(OperatorNode {
            operator,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        })
    }

    pub fn as_operator(&self) -> Option<&OperatorNode> {
        match self {
            Node::Operator(node) => Some(node),
            Node::Operand(_) => None,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        self.as_operator().map(|node| node.operator)
    }

    pub fn child_count(&self) -> usize {
        self.as_operator().map_or(0, OperatorNode::child_count)
    }
}

impl fmt::Display for OperandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandNode::ColumnIndex(column) => write!(f, "_{}_", column.index),
            OperandNode::Scalar(scalar) => write!(f, "{}", scalar.value),
            OperandNode::Collection(collection) => {
                write!(f, "({})", collection.values.join(","))
            }
        }
    }
}

impl fmt::Display for OperatorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = self.left.as_deref();
        let right = self.right.as_deref();

        match self.operator {
            Operator::Not => match left.or(right) {
                Some(child) => write!(f, "NOT ({child})"),
                None => write!(f, "NOT ()"),
            },
            Operator::And | Operator::Or => match (left, right) {
                (Some(l), Some(r)) => write!(f, "({l} {} {r})", self.operator),
                (Some(only), None) | (None, Some(only)) => write!(f, "{only}"),
                (None, None) => Ok(()),
            },
            Operator::IsNull | Operator::IsNotNull => match left {
                Some(column) => write!(f, "{column} {}", self.operator),
                None => write!(f, "{}", self.operator),
            },
            Operator::Noop => match (left, right) {
                (Some(column), Some(Node::Operand(OperandNode::Scalar(scalar))))
                    if scalar.value == "true" =>
                {
                    write!(f, "{column}")
                }
                (Some(column), Some(value)) => write!(f, "{column} = {value}"),
                (Some(column), None) => write!(f, "{column}"),
                _ => Ok(()),
            },
            _ => {
                if let Some(l) = left {
                    write!(f, "{l} ")?;
                }
                write!(f, "{}", self.operator)?;
                if let Some(r) = right {
                    write!(f, " {r}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operator(node) => write!(f, "{node}"),
            Node::Operand(operand) => write!(f, "{operand}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(index: usize, data_type: DataType, value: &str) -> Node {
        Node::comparison(
            Operator::Equals,
            ColumnIndexOperand::new(index),
            OperandNode::Scalar(ScalarOperand::new(data_type, value)),
        )
        .unwrap()
    }

    #[test]
    fn test_not_rejects_two_children() {
        let err = OperatorNode::new(
            Operator::Not,
            Some(eq(1, DataType::Integer, "1")),
            Some(eq(2, DataType::Integer, "2")),
        )
        .unwrap_err();

        assert_eq!(
            err,
            FilterShapeError::Arity {
                operator: Operator::Not,
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_and_requires_two_children() {
        let err = OperatorNode::new(Operator::And, Some(eq(1, DataType::Integer, "1")), None);
        assert!(err.is_err());

        let node = OperatorNode::new(
            Operator::And,
            Some(eq(1, DataType::Integer, "1")),
            Some(eq(2, DataType::Integer, "2")),
        )
        .unwrap();
        assert_eq!(node.child_count(), 2);
    }

    #[test]
    fn test_operand_accessors() {
        let node = eq(5, DataType::Integer, "5");
        let op = node.as_operator().unwrap();

        assert_eq!(op.column_index_operand().map(|c| c.index), Some(5));
        assert!(matches!(op.value_operand(), Some(OperandNode::Scalar(_))));
    }

    #[test]
    fn test_value_operand_missing_when_right_is_column() {
        let node = OperatorNode::new(
            Operator::Like,
            Some(Node::Operand(OperandNode::ColumnIndex(ColumnIndexOperand::new(5)))),
            Some(Node::Operand(OperandNode::ColumnIndex(ColumnIndexOperand::new(5)))),
        )
        .unwrap();

        assert!(node.column_index_operand().is_some());
        assert!(node.value_operand().is_none());
    }

    #[test]
    fn test_comparison_rejects_logical_operator() {
        let result = Node::comparison(
            Operator::And,
            ColumnIndexOperand::new(0),
            OperandNode::Scalar(ScalarOperand::new(DataType::Integer, "1")),
        );
        assert_eq!(result, Err(FilterShapeError::MisplacedOperator(Operator::And)));
    }

    #[test]
    fn test_display_forms() {
        let tree = Node::and(
            eq(1, DataType::Text, "foobar"),
            Node::not(eq(2, DataType::Integer, "999")),
        );
        assert_eq!(tree.to_string(), "(_1_ = foobar AND NOT (_2_ = 999))");

        let null_check = Node::null_check(Operator::IsNotNull, ColumnIndexOperand::new(3)).unwrap();
        assert_eq!(null_check.to_string(), "_3_ IS NOT NULL");

        let list = Node::comparison(
            Operator::In,
            ColumnIndexOperand::new(0),
            OperandNode::Collection(CollectionOperand::new(
                DataType::Int8Array,
                vec!["194".into(), "82756".into()],
            )),
        )
        .unwrap();
        assert_eq!(list.to_string(), "_0_ IN (194,82756)");
    }

    #[test]
    fn test_display_boolean_noop() {
        let truthy = Node::comparison(
            Operator::Noop,
            ColumnIndexOperand::new(4),
            OperandNode::Scalar(ScalarOperand::new(DataType::Boolean, "true")),
        )
        .unwrap();
        assert_eq!(truthy.to_string(), "_4_");

        let falsy = Node::comparison(
            Operator::Noop,
            ColumnIndexOperand::new(0),
            OperandNode::Scalar(ScalarOperand::new(DataType::Boolean, "false")),
        )
        .unwrap();
        assert_eq!(falsy.to_string(), "_0_ = false");
    }
}
