use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison and logical operators a predicate can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Bare boolean column, `WHERE flag`.
    Noop,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Equals,
    NotEquals,
    Like,
    IsNull,
    IsNotNull,
    In,
    And,
    Or,
    Not,
}

impl Operator {
    /// Operator for a wire comparison code (`o<code>`).
    pub fn from_comparison_code(code: i64) -> Option<Self> {
        let op = match code {
            0 => Operator::Noop,
            1 => Operator::LessThan,
            2 => Operator::GreaterThan,
            3 => Operator::LessThanOrEqual,
            4 => Operator::GreaterThanOrEqual,
            5 => Operator::Equals,
            6 => Operator::NotEquals,
            7 => Operator::Like,
            8 => Operator::IsNull,
            9 => Operator::IsNotNull,
            10 => Operator::In,
            _ => return None,
        };
        Some(op)
    }

    /// Operator for a wire logical code (`l<code>`).
    pub fn from_logical_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Operator::And),
            1 => Some(Operator::Or),
            2 => Some(Operator::Not),
            _ => None,
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull | Operator::Not)
    }

    pub fn arity(&self) -> usize {
        if self.is_unary() { 1 } else { 2 }
    }

    /// Whether the operator compares the column against a literal.
    pub fn requires_value(&self) -> bool {
        !self.is_logical() && !self.is_unary()
    }

    pub fn token(&self) -> &'static str {
        match self {
            Operator::Noop => "NOOP",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::Like => "LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::In => "IN",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
        }
    }

    /// Operator to use when the operands of a comparison are swapped, so that
    /// `5 < a` becomes `a > 5`.
    pub fn mirrored(&self) -> Self {
        match self {
            Operator::LessThan => Operator::GreaterThan,
            Operator::GreaterThan => Operator::LessThan,
            Operator::LessThanOrEqual => Operator::GreaterThanOrEqual,
            Operator::GreaterThanOrEqual => Operator::LessThanOrEqual,
            other => *other,
        }
    }

    /// AND for OR and OR for AND, the connective that applies once a group
    /// is negated.
    pub fn dual(&self) -> Self {
        match self {
            Operator::And => Operator::Or,
            Operator::Or => Operator::And,
            other => *other,
        }
    }

    pub fn flag(&self) -> OperatorSet {
        match self {
            Operator::Noop => OperatorSet::NOOP,
            Operator::LessThan => OperatorSet::LESS_THAN,
            Operator::GreaterThan => OperatorSet::GREATER_THAN,
            Operator::LessThanOrEqual => OperatorSet::LESS_THAN_OR_EQUAL,
            Operator::GreaterThanOrEqual => OperatorSet::GREATER_THAN_OR_EQUAL,
            Operator::Equals => OperatorSet::EQUALS,
            Operator::NotEquals => OperatorSet::NOT_EQUALS,
            Operator::Like => OperatorSet::LIKE,
            Operator::IsNull => OperatorSet::IS_NULL,
            Operator::IsNotNull => OperatorSet::IS_NOT_NULL,
            Operator::In => OperatorSet::IN,
            Operator::And => OperatorSet::AND,
            Operator::Or => OperatorSet::OR,
            Operator::Not => OperatorSet::NOT,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

bitflags! {
    /// A set of operators, used for connector capabilities and pruning.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct OperatorSet: u16 {
        const NOOP = 1 << 0;
        const LESS_THAN = 1 << 1;
        const GREATER_THAN = 1 << 2;
        const LESS_THAN_OR_EQUAL = 1 << 3;
        const GREATER_THAN_OR_EQUAL = 1 << 4;
        const EQUALS = 1 << 5;
        const NOT_EQUALS = 1 << 6;
        const LIKE = 1 << 7;
        const IS_NULL = 1 << 8;
        const IS_NOT_NULL = 1 << 9;
        const IN = 1 << 10;
        const AND = 1 << 11;
        const OR = 1 << 12;
        const NOT = 1 << 13;

        const ORDERING = Self::LESS_THAN.bits()
            | Self::GREATER_THAN.bits()
            | Self::LESS_THAN_OR_EQUAL.bits()
            | Self::GREATER_THAN_OR_EQUAL.bits();
        const EQUALITY = Self::EQUALS.bits() | Self::NOT_EQUALS.bits();
        const NULL_CHECKS = Self::IS_NULL.bits() | Self::IS_NOT_NULL.bits();
        const LOGICAL = Self::AND.bits() | Self::OR.bits() | Self::NOT.bits();
    }
}

impl OperatorSet {
    pub fn supports(&self, op: Operator) -> bool {
        self.contains(op.flag())
    }
}

impl FromIterator<Operator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OperatorSet::empty(), |set, op| set | op.flag())
    }
}
