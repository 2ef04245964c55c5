use super::{
    error::FilterShapeError,
    node::{ColumnIndexOperand, Node, OperandNode, OperatorNode},
    operator::Operator,
};
use serde::{Deserialize, Serialize};

/// Flattened form of a predicate: comparisons and ordered logical groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    Basic(BasicFilter),
    Logical(LogicalFilter),
}

/// `column <op> constant`, or `column IS [NOT] NULL` when `constant` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicFilter {
    pub operator: Operator,
    pub column: ColumnIndexOperand,
    pub constant: Option<OperandNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalFilter {
    pub operator: Operator,
    pub filters: Vec<Filter>,
}

impl Filter {
    pub fn operator(&self) -> Operator {
        match self {
            Filter::Basic(basic) => basic.operator,
            Filter::Logical(logical) => logical.operator,
        }
    }
}

impl BasicFilter {
    pub fn new(operator: Operator, column: ColumnIndexOperand, constant: Option<OperandNode>) -> Self {
        Self {
            operator,
            column,
            constant,
        }
    }
}

impl LogicalFilter {
    pub fn new(operator: Operator, filters: Vec<Filter>) -> Self {
        Self { operator, filters }
    }
}

impl TryFrom<Node> for Filter {
    type Error = FilterShapeError;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Operator(operator_node) => Filter::try_from(operator_node),
            Node::Operand(operand) => Err(FilterShapeError::OperandAtRoot(operand.to_string())),
        }
    }
}

impl TryFrom<OperatorNode> for Filter {
    type Error = FilterShapeError;

    fn try_from(mut node: OperatorNode) -> Result<Self, Self::Error> {
        let operator = node.operator;
        let (left, right) = node.take_children();

        if operator.is_logical() {
            let filters = left
                .into_iter()
                .chain(right)
                .map(Filter::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Filter::Logical(LogicalFilter::new(operator, filters)));
        }

        let column = match left {
            Some(Node::Operand(OperandNode::ColumnIndex(column))) => column,
            _ => return Err(FilterShapeError::MissingColumnOperand(operator)),
        };

        let constant = match right {
            None => None,
            Some(Node::Operand(operand @ (OperandNode::Scalar(_) | OperandNode::Collection(_)))) => {
                Some(operand)
            }
            Some(_) => return Err(FilterShapeError::MisplacedOperator(operator)),
        };

        Ok(Filter::Basic(BasicFilter::new(operator, column, constant)))
    }
}
