use crate::{
    capabilities::FilterCapabilities,
    connector::FilterConnector,
    error::{ConnectorError, ConnectorResult},
};
use lazy_static::lazy_static;
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::operator::{Operator, OperatorSet},
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const S3_SELECT_SOURCE: &str = "S3Object";
pub const S3_TABLE_ALIAS: &str = "s";

lazy_static! {
    /// How a column of each filterable type is read in S3 Select, where every
    /// field of a CSV or JSON object arrives as text.
    static ref COLUMN_CASTS: HashMap<DataType, ColumnCast> = {
        let mut m = HashMap::new();
        m.insert(DataType::Smallint, ColumnCast::As("int"));
        m.insert(DataType::Integer, ColumnCast::As("int"));
        m.insert(DataType::Bigint, ColumnCast::As("int"));
        m.insert(DataType::Boolean, ColumnCast::As("bool"));
        m.insert(DataType::Float8, ColumnCast::As("float"));
        m.insert(DataType::Real, ColumnCast::As("decimal"));
        m.insert(DataType::Text, ColumnCast::Plain);
        m.insert(DataType::Varchar, ColumnCast::Plain);
        m.insert(DataType::Bpchar, ColumnCast::Plain);
        m.insert(DataType::Date, ColumnCast::Timestamp);
        m.insert(DataType::Timestamp, ColumnCast::Timestamp);
        m
    };
}

#[derive(Debug, Clone, Copy)]
enum ColumnCast {
    Plain,
    As(&'static str),
    Timestamp,
}

impl ColumnCast {
    fn apply(&self, column_name: &str) -> String {
        match self {
            ColumnCast::Plain => column_name.to_string(),
            ColumnCast::As(target) => format!("CAST ({column_name} AS {target})"),
            ColumnCast::Timestamp => format!("TO_TIMESTAMP({column_name})"),
        }
    }
}

/// Renders filters for the `WHERE` clause of an S3 Select query.
#[derive(Debug, Clone, Copy, Default)]
pub struct S3SelectConnector {
    use_position: bool,
}

impl S3SelectConnector {
    /// With `use_position` columns are addressed as `s._1`, `s._2`, ... (files
    /// without a header line) instead of by name.
    pub fn new(use_position: bool) -> Self {
        Self { use_position }
    }

    /// Column types S3 Select can compare.
    pub fn supported_types() -> HashSet<DataType> {
        COLUMN_CASTS.keys().copied().collect()
    }

    /// Builds the full S3 Select statement over `columns`.
    pub fn select_query(&self, columns: &[ColumnDescriptor], filter: Option<&str>) -> String {
        let projection = columns
            .iter()
            .map(|column| self.column_name(column))
            .collect::<Vec<_>>()
            .join(", ");

        let mut query = format!("SELECT {projection} FROM {S3_SELECT_SOURCE} {S3_TABLE_ALIAS}");
        if let Some(filter) = filter {
            query.push_str(" WHERE ");
            query.push_str(filter);
        }
        query
    }
}

impl FilterConnector for S3SelectConnector {
    fn capabilities(&self) -> FilterCapabilities {
        FilterCapabilities::new(
            OperatorSet::ORDERING | OperatorSet::EQUALITY | OperatorSet::IN | OperatorSet::NULL_CHECKS,
            OperatorSet::LOGICAL,
        )
    }

    fn column_name(&self, column: &ColumnDescriptor) -> String {
        if self.use_position {
            format!("{S3_TABLE_ALIAS}._{}", column.index + 1)
        } else {
            format!("{S3_TABLE_ALIAS}.\"{}\"", column.name)
        }
    }

    fn is_filter_compatible(
        &self,
        column_name: &str,
        column: &ColumnDescriptor,
        _operator: Operator,
        _logical: Option<Operator>,
    ) -> bool {
        let supported = COLUMN_CASTS.contains_key(&column.data_type);
        if !supported {
            debug!(column = %column_name, data_type = %column.data_type, "No S3 Select cast for column type");
        }
        supported
    }

    fn add_column_name(
        &self,
        out: &mut String,
        column_name: &str,
        column: &ColumnDescriptor,
        operator: Operator,
    ) {
        match COLUMN_CASTS.get(&column.data_type) {
            Some(cast) if !operator.is_unary() => out.push_str(&cast.apply(column_name)),
            _ => out.push_str(column_name),
        }
    }

    fn map_value(&self, value: &str, column: &ColumnDescriptor) -> ConnectorResult<String> {
        match column.data_type {
            DataType::Smallint
            | DataType::Integer
            | DataType::Bigint
            | DataType::Float8
            | DataType::Real
            | DataType::Boolean => Ok(value.to_string()),
            DataType::Text | DataType::Varchar | DataType::Bpchar => {
                Ok(format!("'{}'", value.replace('\'', "''")))
            }
            DataType::Date | DataType::Timestamp => Ok(format!("TO_TIMESTAMP('{value}')")),
            data_type => Err(ConnectorError::UnsupportedColumnType {
                column: column.name.clone(),
                data_type,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", DataType::Integer, 0),
            ColumnDescriptor::new("cdate", DataType::Date, 1),
            ColumnDescriptor::new("amt", DataType::Float8, 2),
            ColumnDescriptor::new("grade", DataType::Text, 3),
        ]
    }

    #[test]
    fn test_select_without_filter() {
        let columns = columns();
        assert_eq!(
            S3SelectConnector::new(true).select_query(&columns, None),
            "SELECT s._1, s._2, s._3, s._4 FROM S3Object s"
        );
        assert_eq!(
            S3SelectConnector::new(false).select_query(&columns, None),
            r#"SELECT s."id", s."cdate", s."amt", s."grade" FROM S3Object s"#
        );
    }

    #[test]
    fn test_casts_by_type() {
        let columns = columns();
        let connector = S3SelectConnector::new(true);
        let mut out = String::new();
        connector.add_column_name(&mut out, "s._1", &columns[0], Operator::Equals);
        assert_eq!(out, "CAST (s._1 AS int)");

        out.clear();
        connector.add_column_name(&mut out, "s._2", &columns[1], Operator::GreaterThan);
        assert_eq!(out, "TO_TIMESTAMP(s._2)");

        out.clear();
        connector.add_column_name(&mut out, "s._1", &columns[0], Operator::IsNull);
        assert_eq!(out, "s._1");
    }

    #[test]
    fn test_unsupported_type_is_not_compatible() {
        let column = ColumnDescriptor::new("price", DataType::Numeric, 0);
        let connector = S3SelectConnector::new(false);
        assert!(!connector.is_filter_compatible("s.\"price\"", &column, Operator::Equals, None));
        assert!(!S3SelectConnector::supported_types().contains(&DataType::Numeric));
    }
}
