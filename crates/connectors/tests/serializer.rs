//! Serializing parsed filters through each connector

use connectors::{
    capabilities::FilterCapabilities,
    catalog::hive::HivePartitionConnector,
    connector::FilterConnector,
    error::{ConnectorError, ConnectorResult},
    file::s3_select::S3SelectConnector,
    generic::PredicateConnector,
    serializer::FilterSerializer,
    sql::{dialect::DbProduct, jdbc::JdbcConnector},
};
use filter_syntax::{builder::FlatFilterBuilder, parser::FilterParser};
use model::{
    core::{column::ColumnDescriptor, data_type::DataType},
    filter::operator::Operator,
};
use std::collections::HashMap;

fn sales_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", DataType::Integer, 0),
        ColumnDescriptor::new("cdate", DataType::Date, 1),
        ColumnDescriptor::new("amt", DataType::Float8, 2),
        ColumnDescriptor::new("grade", DataType::Text, 3),
        ColumnDescriptor::new("b", DataType::Boolean, 4),
    ]
}

fn serialize(
    connector: &dyn FilterConnector,
    columns: &[ColumnDescriptor],
    filter: &str,
) -> ConnectorResult<Option<String>> {
    let filter = FilterParser::with_columns(columns)
        .parse(filter, &FlatFilterBuilder)
        .unwrap_or_else(|err| panic!("{filter}: {err}"));
    FilterSerializer::new(connector, columns).serialize(&filter)
}

fn render(connector: &dyn FilterConnector, filter: &str) -> Option<String> {
    serialize(connector, &sales_columns(), filter).unwrap()
}

#[test]
fn test_predicate_connector_renders_raw_values() {
    let connector = PredicateConnector::new();

    assert_eq!(render(&connector, "a0c20s1d1o5").as_deref(), Some("id = 1"));
    assert_eq!(
        render(&connector, "a1c25s10d2008-02-01o2a1c25s10d2008-12-01o1l0a2c20s4d1200o2l0").as_deref(),
        Some("((cdate > 2008-02-01 AND cdate < 2008-12-01) AND amt > 1200)")
    );
    assert_eq!(
        render(&connector, "a0m1016s3d194s5d82756o10").as_deref(),
        Some("id IN (194,82756)")
    );
    assert_eq!(render(&connector, "a3c25s3dbado10").as_deref(), Some("grade IN bad"));
    assert_eq!(render(&connector, "a4c16s4dtrueo0l2").as_deref(), Some("NOT (b)"));
    assert_eq!(
        render(&PredicateConnector::new().with_quote("\""), "a0c20s1d1o5").as_deref(),
        Some("\"id\" = 1")
    );
}

#[test]
fn test_jdbc_where_clause_for_mysql() {
    let connector = JdbcConnector::new(DbProduct::MySql);

    assert_eq!(render(&connector, "a0c20s1d1o5").as_deref(), Some("id = 1"));
    assert_eq!(
        render(&connector, "a1c25s10d2008-02-01o2a1c25s10d2008-12-01o1l0a2c20s4d1200o2l0").as_deref(),
        Some("((cdate > DATE('2008-02-01') AND cdate < DATE('2008-12-01')) AND amt > 1200)")
    );
    assert_eq!(
        render(&connector, "a1c1082s10d2008-02-01o2a1c1082s10d2008-12-01o1a0c23s4d1200o2l0l1").as_deref(),
        Some("(cdate > DATE('2008-02-01') OR (cdate < DATE('2008-12-01') AND id > 1200))")
    );
    assert_eq!(render(&connector, "a3o9").as_deref(), Some("grade IS NOT NULL"));
    assert_eq!(render(&connector, "a4c16s4dtrueo0l2").as_deref(), Some("NOT (b)"));

    let filter = render(&connector, "a1c25s10d2008-02-01o2a2c20s4d1200o2l1");
    assert_eq!(
        JdbcConnector::where_clause(filter.as_deref(), false),
        " WHERE (cdate > DATE('2008-02-01') OR amt > 1200)"
    );
}

#[test]
fn test_jdbc_skips_unsupported_operator() {
    // IN is not part of the JDBC capabilities
    let connector = JdbcConnector::new(DbProduct::Postgres);
    assert_eq!(render(&connector, "a3c25s3dbado10"), None);
    // and an OR cannot lose a branch
    assert_eq!(render(&connector, "a0c20s1d1o5a3c25s3dbado10l1"), None);
    assert_eq!(
        render(&connector, "a0c20s1d1o5a3c25s3dbado10l0").as_deref(),
        Some("id = 1")
    );
}

#[test]
fn test_jdbc_quotes_and_escapes() {
    let connector = JdbcConnector::new(DbProduct::Postgres).with_quote("\"");
    assert_eq!(
        render(&connector, "a3c25s7dO'Neillo5").as_deref(),
        Some("\"grade\" = 'O''Neill'")
    );
    assert_eq!(
        render(&connector, "a1c1082s10d2018-01-01o4").as_deref(),
        Some("\"cdate\" >= date'2018-01-01'")
    );
}

#[test]
fn test_jdbc_unsupported_column_type_is_an_error() {
    let columns = vec![ColumnDescriptor::new("doc", DataType::Json, 0)];
    let err = serialize(&JdbcConnector::new(DbProduct::Oracle), &columns, "a0c25s2d{}o5").unwrap_err();
    assert_eq!(
        err,
        ConnectorError::UnsupportedColumnType {
            column: "doc".into(),
            data_type: DataType::Json,
        }
    );
}

#[test]
fn test_s3_select_by_position_and_name() {
    let by_position = S3SelectConnector::new(true);
    let by_name = S3SelectConnector::new(false);

    assert_eq!(render(&by_position, "a0c20s1d1o5").as_deref(), Some("CAST (s._1 AS int) = 1"));
    assert_eq!(render(&by_name, "a0c20s1d1o5").as_deref(), Some("CAST (s.\"id\" AS int) = 1"));

    assert_eq!(
        render(&by_position, "a1c25s10d2008-02-01o2a1c25s10d2008-12-01o1l0a2c20s4d1200o2l0").as_deref(),
        Some(
            "((TO_TIMESTAMP(s._2) > TO_TIMESTAMP('2008-02-01') AND TO_TIMESTAMP(s._2) < TO_TIMESTAMP('2008-12-01')) AND CAST (s._3 AS float) > 1200)"
        )
    );
}

#[test]
fn test_s3_select_lists_and_null_checks() {
    let connector = S3SelectConnector::new(true);

    assert_eq!(
        render(&connector, "a0m1016s3d194s5d82756o10").as_deref(),
        Some("CAST (s._1 AS int) IN (194,82756)")
    );
    assert_eq!(
        render(&connector, "a3m1009s5dA'B'Cs1dBo10").as_deref(),
        Some("s._4 IN ('A''B''C','B')")
    );
    assert_eq!(render(&connector, "a3o9").as_deref(), Some("s._4 IS NOT NULL"));
    assert_eq!(render(&connector, "a3o8").as_deref(), Some("s._4 IS NULL"));
    // LIKE is not evaluated by S3 Select
    assert_eq!(render(&connector, "a3c25s2dA%o7"), None);
}

fn hive() -> HivePartitionConnector {
    HivePartitionConnector::new(HashMap::from([
        ("grade".to_string(), "string".to_string()),
        ("id".to_string(), "bigint".to_string()),
    ]))
}

#[test]
fn test_hive_keeps_partition_conjuncts() {
    let connector = hive();

    assert_eq!(render(&connector, "a3c25s4dgoodo5").as_deref(), Some("grade = \"good\""));
    // amt is not a partition key
    assert_eq!(
        render(&connector, "a3c25s4dgoodo5a2c20s4d1200o2l0").as_deref(),
        Some("grade = \"good\"")
    );
    assert_eq!(render(&connector, "a3c25s4dgoodo5a2c20s4d1200o2l1"), None);
    assert_eq!(render(&connector, "a2c20s4d1200o2a2c20s4d1300o1l0"), None);
}

#[test]
fn test_hive_integral_partitions() {
    assert_eq!(render(&hive(), "a0c20s1d7o5"), None);
    let connector = hive().with_integral_push_down(true);
    assert_eq!(render(&connector, "a0c20s1d7o5").as_deref(), Some("id = \"7\""));
    assert_eq!(render(&connector, "a0c20s1d7o2"), None);
}

/// Renders everything except comparisons on `amt`.
struct HidesAmount;

impl FilterConnector for HidesAmount {
    fn capabilities(&self) -> FilterCapabilities {
        PredicateConnector::new().capabilities()
    }

    fn is_filter_compatible(
        &self,
        column_name: &str,
        _column: &ColumnDescriptor,
        _operator: Operator,
        _logical: Option<Operator>,
    ) -> bool {
        column_name != "amt"
    }

    fn map_value(&self, value: &str, _column: &ColumnDescriptor) -> ConnectorResult<String> {
        Ok(value.to_string())
    }
}

#[test]
fn test_skipped_conjunct_under_not_drops_the_group() {
    // id = 1 AND amt > 5
    assert_eq!(render(&HidesAmount, "a0c20s1d1o5a2c20s1d5o2l0").as_deref(), Some("id = 1"));
    // NOT (id = 1 AND amt > 5) must not narrow to NOT (id = 1)
    assert_eq!(render(&HidesAmount, "a0c20s1d1o5a2c20s1d5o2l0l2"), None);
    // NOT (id = 1 OR amt > 5) may keep NOT (id = 1)
    assert_eq!(
        render(&HidesAmount, "a0c20s1d1o5a2c20s1d5o2l1l2").as_deref(),
        Some("NOT (id = 1)")
    );
    // id = 1 AND NOT (amt > 5)
    assert_eq!(render(&HidesAmount, "a0c20s1d1o5a2c20s1d5o2l2l0").as_deref(), Some("id = 1"));
}

#[test]
fn test_boolean_column_comparisons() {
    let connector = PredicateConnector::new();
    assert_eq!(render(&connector, "a4c16s4dtrueo0").as_deref(), Some("b"));
    assert_eq!(render(&connector, "a4c16s1dto5").as_deref(), Some("b"));
    assert_eq!(render(&connector, "a4c16s5dfalseo5"), None);
    assert_eq!(render(&connector, "a4o8").as_deref(), Some("b IS NULL"));
}

#[test]
fn test_column_out_of_range() {
    let err = serialize(&PredicateConnector::new(), &sales_columns(), "a9c20s1d1o5").unwrap_err();
    assert_eq!(err, ConnectorError::ColumnIndexOutOfRange { index: 9, count: 5 });
}

#[test]
fn test_serializing_twice_gives_the_same_text() {
    let columns = sales_columns();
    let connector = JdbcConnector::new(DbProduct::Postgres);
    let filter = FilterParser::with_columns(&columns)
        .parse("a0c20s1d1o5a3o9l0", &FlatFilterBuilder)
        .unwrap();
    let serializer = FilterSerializer::new(&connector, &columns);

    let first = serializer.serialize(&filter).unwrap();
    let second = serializer.serialize(&filter).unwrap();

    assert_eq!(first.as_deref(), Some("(id = 1 AND grade IS NOT NULL)"));
    assert_eq!(first, second);
}
