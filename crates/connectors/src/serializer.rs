use crate::{
    connector::FilterConnector,
    error::{ConnectorError, ConnectorResult},
};
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::{
        flat::{BasicFilter, Filter, LogicalFilter},
        node::OperandNode,
        operator::Operator,
    },
};
use tracing::{debug, trace};

/// Renders a pruned filter in a connector's native syntax.
///
/// Returns `Ok(None)` when nothing could be rendered, in which case the
/// caller fetches unfiltered rows and the query engine filters them itself.
pub struct FilterSerializer<'a, C: FilterConnector + ?Sized> {
    connector: &'a C,
    columns: &'a [ColumnDescriptor],
}

impl<'a, C: FilterConnector + ?Sized> FilterSerializer<'a, C> {
    pub fn new(connector: &'a C, columns: &'a [ColumnDescriptor]) -> Self {
        Self { connector, columns }
    }

    pub fn serialize(&self, filter: &Filter) -> ConnectorResult<Option<String>> {
        let rendered = match filter {
            Filter::Basic(basic) => self.basic(basic, None)?,
            Filter::Logical(logical) => self.logical(logical, false)?,
        };

        Ok(rendered.filter(|text| !text.trim().is_empty()))
    }

    fn column(&self, index: usize) -> ConnectorResult<&'a ColumnDescriptor> {
        self.columns
            .get(index)
            .ok_or(ConnectorError::ColumnIndexOutOfRange {
                index,
                count: self.columns.len(),
            })
    }

    fn basic(
        &self,
        filter: &BasicFilter,
        logical: Option<Operator>,
    ) -> ConnectorResult<Option<String>> {
        let operator = filter.operator;
        let column = self.column(filter.column.index)?;
        let column_name = self.connector.column_name(column);

        if !self
            .connector
            .is_filter_compatible(&column_name, column, operator, logical)
        {
            trace!(column = %column_name, %operator, "Connector rejected filter on column");
            return Ok(None);
        }

        if column.data_type == DataType::Boolean && !operator.is_unary() {
            return Ok(self.boolean(filter, &column_name, column));
        }

        if operator == Operator::Noop {
            debug!(column = %column_name, "NOOP is only pushed down on boolean columns");
            return Ok(None);
        }

        if !self.connector.capabilities().operators.supports(operator) {
            debug!(%operator, "Operator is not supported by connector");
            return Ok(None);
        }

        let mut out = String::new();
        self.connector
            .add_column_name(&mut out, &column_name, column, operator);
        out.push(' ');
        out.push_str(operator.token());

        if operator.requires_value() {
            match &filter.constant {
                Some(OperandNode::Scalar(scalar)) => {
                    out.push(' ');
                    out.push_str(&self.connector.map_value(&scalar.value, column)?);
                }
                Some(OperandNode::Collection(collection)) => {
                    let values = collection
                        .values
                        .iter()
                        .map(|value| self.connector.map_value(value, column))
                        .collect::<ConnectorResult<Vec<_>>>()?;
                    out.push_str(" (");
                    out.push_str(&values.join(","));
                    out.push(')');
                }
                Some(OperandNode::ColumnIndex(_)) | None => {
                    return Err(ConnectorError::MissingValue(operator));
                }
            }
        }

        Ok(Some(out))
    }

    /// A boolean column compared against true renders as the bare column.
    /// Any other comparison on it is left to the query engine.
    fn boolean(
        &self,
        filter: &BasicFilter,
        column_name: &str,
        column: &ColumnDescriptor,
    ) -> Option<String> {
        let asserts_true = matches!(filter.operator, Operator::Noop | Operator::Equals)
            && matches!(
                &filter.constant,
                Some(OperandNode::Scalar(scalar)) if is_true_literal(&scalar.value)
            );

        if !asserts_true {
            debug!(column = %column_name, operator = %filter.operator, "Boolean comparison is not pushed down");
            return None;
        }

        let mut out = String::new();
        self.connector
            .add_column_name(&mut out, column_name, column, Operator::Noop);
        Some(out)
    }

    /// `negated` is true under an odd number of enclosing `NOT`s, where
    /// dropping a child has the effect of the dual connective.
    fn logical(&self, filter: &LogicalFilter, negated: bool) -> ConnectorResult<Option<String>> {
        let operator = filter.operator;
        if !self.connector.capabilities().logical.supports(operator) {
            debug!(%operator, "Logical operator is not supported by connector");
            return Ok(None);
        }

        let child_negated = negated ^ (operator == Operator::Not);
        let effective = if negated { operator.dual() } else { operator };

        let mut parts = Vec::with_capacity(filter.filters.len());
        for child in &filter.filters {
            let rendered = match child {
                Filter::Basic(basic) => self.basic(basic, Some(operator))?,
                Filter::Logical(logical) => self.logical(logical, child_negated)?,
            };

            match rendered {
                Some(text) => parts.push(text),
                None if self.connector.is_compliant_with_operator(effective) => {
                    trace!(%operator, "Omitting child that could not be rendered");
                }
                None => return Ok(None),
            }
        }

        let rendered = match (operator, parts.len()) {
            (_, 0) => None,
            (Operator::Not, _) => Some(format!("NOT ({})", parts.join(""))),
            (_, 1) => parts.pop(),
            _ => Some(format!("({})", parts.join(&format!(" {operator} ")))),
        };
        Ok(rendered)
    }
}

fn is_true_literal(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "t" | "1")
}
