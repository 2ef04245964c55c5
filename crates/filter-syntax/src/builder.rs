use crate::error::BuildError;
use model::filter::{
    error::FilterShapeError,
    flat::{BasicFilter, Filter, LogicalFilter},
    node::{ColumnIndexOperand, Node, OperandNode, OperatorNode},
    operator::Operator,
};

pub type BuildResult<T> = Result<T, BuildError>;

/// Callbacks the filter parser invokes bottom-up as it reduces the token stream.
///
/// Comparison callbacks receive raw operands with the column reference already
/// moved to the left. Logical callbacks receive previously built outputs.
pub trait FilterBuilder {
    type Output;

    /// `column <op> value` for binary comparisons, `NOOP` and `IN`.
    fn build_binary(
        &self,
        operator: Operator,
        left: OperandNode,
        right: OperandNode,
    ) -> BuildResult<Self::Output>;

    /// Only `IS NULL` and `IS NOT NULL` are unary comparisons.
    fn build_unary(&self, operator: Operator, operand: OperandNode) -> BuildResult<Self::Output>;

    fn build_logical_binary(
        &self,
        operator: Operator,
        left: Self::Output,
        right: Self::Output,
    ) -> BuildResult<Self::Output>;

    fn build_logical_unary(
        &self,
        operator: Operator,
        operand: Self::Output,
    ) -> BuildResult<Self::Output>;
}

fn check_binary(operator: Operator) -> BuildResult<()> {
    if operator.is_logical() || operator.is_unary() {
        return Err(BuildError::UnsupportedOperation {
            operator,
            kind: "binary",
        });
    }
    Ok(())
}

fn check_unary(operator: Operator) -> BuildResult<()> {
    if !matches!(operator, Operator::IsNull | Operator::IsNotNull) {
        return Err(BuildError::UnsupportedOperation {
            operator,
            kind: "unary",
        });
    }
    Ok(())
}

/// Both builders accept the same comparison shapes: a column on the left and,
/// for binary operators, a constant on the right.
fn comparison_column(operator: Operator, left: OperandNode) -> BuildResult<ColumnIndexOperand> {
    match left {
        OperandNode::ColumnIndex(column) => Ok(column),
        _ => Err(FilterShapeError::MissingColumnOperand(operator).into()),
    }
}

fn comparison_value(operator: Operator, right: OperandNode) -> BuildResult<OperandNode> {
    match right {
        OperandNode::ColumnIndex(_) => Err(FilterShapeError::MisplacedOperator(operator).into()),
        value => Ok(value),
    }
}

fn check_logical_binary(operator: Operator) -> BuildResult<()> {
    if !matches!(operator, Operator::And | Operator::Or) {
        return Err(BuildError::UnsupportedOperation {
            operator,
            kind: "binary logical",
        });
    }
    Ok(())
}

fn check_logical_unary(operator: Operator) -> BuildResult<()> {
    if operator != Operator::Not {
        return Err(BuildError::UnsupportedOperation {
            operator,
            kind: "unary logical",
        });
    }
    Ok(())
}

/// Builds the [`Node`] expression tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeBuilder;

impl FilterBuilder for NodeBuilder {
    type Output = Node;

    fn build_binary(
        &self,
        operator: Operator,
        left: OperandNode,
        right: OperandNode,
    ) -> BuildResult<Node> {
        check_binary(operator)?;
        let column = comparison_column(operator, left)?;
        let value = comparison_value(operator, right)?;
        let node = OperatorNode::new(
            operator,
            Some(Node::Operand(OperandNode::ColumnIndex(column))),
            Some(Node::Operand(value)),
        )?;
        Ok(Node::Operator(node))
    }

    fn build_unary(&self, operator: Operator, operand: OperandNode) -> BuildResult<Node> {
        check_unary(operator)?;
        let column = comparison_column(operator, operand)?;
        let node = OperatorNode::new(
            operator,
            Some(Node::Operand(OperandNode::ColumnIndex(column))),
            None,
        )?;
        Ok(Node::Operator(node))
    }

    fn build_logical_binary(&self, operator: Operator, left: Node, right: Node) -> BuildResult<Node> {
        check_logical_binary(operator)?;
        let node = OperatorNode::new(operator, Some(left), Some(right))?;
        Ok(Node::Operator(node))
    }

    fn build_logical_unary(&self, operator: Operator, operand: Node) -> BuildResult<Node> {
        check_logical_unary(operator)?;
        let node = OperatorNode::new(operator, Some(operand), None)?;
        Ok(Node::Operator(node))
    }
}

/// Builds the flattened [`Filter`] form directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatFilterBuilder;

impl FilterBuilder for FlatFilterBuilder {
    type Output = Filter;

    fn build_binary(
        &self,
        operator: Operator,
        left: OperandNode,
        right: OperandNode,
    ) -> BuildResult<Filter> {
        check_binary(operator)?;
        let column = comparison_column(operator, left)?;
        let value = comparison_value(operator, right)?;
        Ok(Filter::Basic(BasicFilter::new(operator, column, Some(value))))
    }

    fn build_unary(&self, operator: Operator, operand: OperandNode) -> BuildResult<Filter> {
        check_unary(operator)?;
        let column = comparison_column(operator, operand)?;
        Ok(Filter::Basic(BasicFilter::new(operator, column, None)))
    }

    fn build_logical_binary(
        &self,
        operator: Operator,
        left: Filter,
        right: Filter,
    ) -> BuildResult<Filter> {
        check_logical_binary(operator)?;
        Ok(Filter::Logical(LogicalFilter::new(operator, vec![left, right])))
    }

    fn build_logical_unary(&self, operator: Operator, operand: Filter) -> BuildResult<Filter> {
        check_logical_unary(operator)?;
        Ok(Filter::Logical(LogicalFilter::new(operator, vec![operand])))
    }
}
