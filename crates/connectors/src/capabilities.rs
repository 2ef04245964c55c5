use model::filter::operator::{Operator, OperatorSet};
use serde::{Deserialize, Serialize};

/// Operators a connector can evaluate natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCapabilities {
    pub operators: OperatorSet,     // comparisons, IN and null checks
    pub logical: OperatorSet,       // AND / OR / NOT
}

impl FilterCapabilities {
    pub fn new(operators: OperatorSet, logical: OperatorSet) -> Self {
        Self {
            operators: operators - OperatorSet::LOGICAL,
            logical: logical & OperatorSet::LOGICAL,
        }
    }

    /// Everything the pruner may keep.
    pub fn all(&self) -> OperatorSet {
        self.operators | self.logical
    }

    pub fn supports(&self, operator: Operator) -> bool {
        if operator.is_logical() {
            self.logical.supports(operator)
        } else {
            self.operators.supports(operator)
        }
    }
}

impl Default for FilterCapabilities {
    fn default() -> Self {
        Self::new(OperatorSet::empty(), OperatorSet::empty())
    }
}
