use crate::{capabilities::FilterCapabilities, connector::FilterConnector, error::ConnectorResult};
use model::{core::column::ColumnDescriptor, filter::operator::OperatorSet};

/// Writes every comparison with literals as they arrived on the wire.
///
/// Useful for sources that re-parse the predicate themselves, and for
/// inspecting what a filter looks like after pruning.
#[derive(Debug, Clone, Default)]
pub struct PredicateConnector {
    quote: String,
}

impl PredicateConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }
}

impl FilterConnector for PredicateConnector {
    fn capabilities(&self) -> FilterCapabilities {
        FilterCapabilities::new(OperatorSet::all(), OperatorSet::LOGICAL)
    }

    fn column_name(&self, column: &ColumnDescriptor) -> String {
        format!("{quote}{name}{quote}", quote = self.quote, name = column.name)
    }

    fn map_value(&self, value: &str, _column: &ColumnDescriptor) -> ConnectorResult<String> {
        Ok(value.to_string())
    }
}
