use crate::{capabilities::FilterCapabilities, error::ConnectorResult};
use model::{core::column::ColumnDescriptor, filter::operator::Operator};

/// Hooks a data source implements to receive push-down filters in its own syntax.
///
/// The [`FilterSerializer`](crate::serializer::FilterSerializer) walks the
/// filter and asks the connector how to name columns, which comparisons it
/// accepts and how to write literals. Defaults are the conservative choice
/// for each hook.
pub trait FilterConnector: Send + Sync {
    /// Operators the source evaluates; anything else is pruned before serialization.
    fn capabilities(&self) -> FilterCapabilities;

    /// Name used for `column` in the rendered filter.
    fn column_name(&self, column: &ColumnDescriptor) -> String {
        column.name.clone()
    }

    /// Lets the source veto a single comparison. `logical` is the operator of
    /// the enclosing group, if any.
    fn is_filter_compatible(
        &self,
        _column_name: &str,
        _column: &ColumnDescriptor,
        _operator: Operator,
        _logical: Option<Operator>,
    ) -> bool {
        true
    }

    /// Whether a child that could not be rendered may be left out of a group
    /// joined by `operator`. Leaving out a conjunct only widens the result, so
    /// only `AND` allows it by default.
    fn is_compliant_with_operator(&self, operator: Operator) -> bool {
        operator == Operator::And
    }

    /// Appends the column reference for a comparison to `out`.
    fn add_column_name(
        &self,
        out: &mut String,
        column_name: &str,
        _column: &ColumnDescriptor,
        _operator: Operator,
    ) {
        out.push_str(column_name);
    }

    /// Renders a literal compared against `column`.
    fn map_value(&self, value: &str, column: &ColumnDescriptor) -> ConnectorResult<String>;
}
