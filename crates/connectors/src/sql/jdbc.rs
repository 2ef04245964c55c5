use super::dialect::DbProduct;
use crate::{
    capabilities::FilterCapabilities,
    connector::FilterConnector,
    error::{ConnectorError, ConnectorResult},
};
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::operator::OperatorSet,
};

/// Renders filters as a SQL `WHERE` clause for a relational database.
#[derive(Debug, Clone, Default)]
pub struct JdbcConnector {
    product: DbProduct,
    quote: String,
}

impl JdbcConnector {
    pub fn new(product: DbProduct) -> Self {
        Self {
            product,
            quote: String::new(),
        }
    }

    /// Quotes column names with `quote` on both sides, e.g. `"` for `"id"`.
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    pub fn product(&self) -> DbProduct {
        self.product
    }

    /// Prefixes a rendered filter with ` WHERE `. Partitioned queries append
    /// their own range condition, so the filter is parenthesized for them.
    pub fn where_clause(filter: Option<&str>, partitioned: bool) -> String {
        match filter {
            Some(filter) if partitioned => format!(" WHERE ({filter})"),
            Some(filter) => format!(" WHERE {filter}"),
            None => String::new(),
        }
    }
}

impl FilterConnector for JdbcConnector {
    fn capabilities(&self) -> FilterCapabilities {
        FilterCapabilities::new(
            OperatorSet::NOOP
                | OperatorSet::ORDERING
                | OperatorSet::EQUALITY
                | OperatorSet::LIKE
                | OperatorSet::NULL_CHECKS,
            OperatorSet::LOGICAL,
        )
    }

    fn column_name(&self, column: &ColumnDescriptor) -> String {
        format!("{quote}{name}{quote}", quote = self.quote, name = column.name)
    }

    fn map_value(&self, value: &str, column: &ColumnDescriptor) -> ConnectorResult<String> {
        let dialect = self.product.dialect();
        match column.data_type {
            DataType::Smallint
            | DataType::Integer
            | DataType::Bigint
            | DataType::Float8
            | DataType::Real
            | DataType::Numeric
            | DataType::Boolean => Ok(value.to_string()),
            DataType::Text | DataType::Varchar | DataType::Bpchar => {
                Ok(format!("'{}'", value.replace('\'', "''")))
            }
            DataType::Date => Ok(dialect.wrap_date(value)),
            DataType::Timestamp => Ok(dialect.wrap_timestamp(value)),
            data_type => Err(ConnectorError::UnsupportedColumnType {
                column: column.name.clone(),
                data_type,
            }),
        }
    }
}
