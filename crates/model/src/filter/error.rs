use super::operator::Operator;
use thiserror::Error;

/// Errors raised when a node or filter does not have the shape its operator requires.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterShapeError {
    /// The operator was given the wrong number of operands.
    #[error("Operator {operator} expects {expected} operand(s), got {found}")]
    Arity {
        operator: Operator,
        expected: usize,
        found: usize,
    },

    /// A logical operator was used where a comparison was expected, or the reverse.
    #[error("Operator {0} cannot be used here")]
    MisplacedOperator(Operator),

    /// A comparison whose left operand is not a column reference.
    #[error("Operator {0} does not contain a column index operand")]
    MissingColumnOperand(Operator),

    /// A bare operand cannot stand as a predicate on its own.
    #[error("Filter root must be an operator, found operand {0}")]
    OperandAtRoot(String),
}
