//! End-to-end push-down: filter string in, native predicate out

use connectors::{
    catalog::hive::HivePartitionConnector,
    file::s3_select::S3SelectConnector,
    generic::PredicateConnector,
    sql::{dialect::DbProduct, jdbc::JdbcConnector},
};
use engine_config::settings::PushdownSettings;
use engine_processing::{error::PushdownError, pushdown::compiler::PushdownCompiler};
use model::core::{column::ColumnDescriptor, data_type::DataType};
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

#[test]
fn test_jdbc_end_to_end() {
    let columns = sales_columns();
    let connector = JdbcConnector::new(DbProduct::MySql);
    let compiler = PushdownCompiler::new(&connector, &columns);

    assert_eq!(compiler.compile("a0c20s1d1o5").unwrap().as_deref(), Some("id = 1"));
    assert_eq!(
        compiler
            .compile("a1c25s10d2008-02-01o2a1c25s10d2008-12-01o1l0a2c20s4d1200o2l0")
            .unwrap()
            .as_deref(),
        Some("((cdate > DATE('2008-02-01') AND cdate < DATE('2008-12-01')) AND amt > 1200)")
    );
    assert_eq!(compiler.compile("a3o9").unwrap().as_deref(), Some("grade IS NOT NULL"));
    // IN is pruned for JDBC
    assert_eq!(compiler.compile("a3c25s3dbado10").unwrap(), None);
    assert_eq!(compiler.compile("a4c16s4dtrueo0l2").unwrap().as_deref(), Some("NOT (b)"));
}

#[test]
fn test_pruned_conjunct_widens_and_pruned_disjunct_drops() {
    let columns = sales_columns();
    let connector = JdbcConnector::new(DbProduct::Postgres);
    let compiler = PushdownCompiler::new(&connector, &columns);

    // id = 1 AND grade IN ('bad')
    assert_eq!(
        compiler.compile("a0c20s1d1o5a3c25s3dbado10l0").unwrap().as_deref(),
        Some("id = 1")
    );
    // id = 1 OR grade IN ('bad')
    assert_eq!(compiler.compile("a0c20s1d1o5a3c25s3dbado10l1").unwrap(), None);
    // NOT (id = 1 AND grade IN ('bad')) keeps nothing
    assert_eq!(compiler.compile("a0c20s1d1o5a3c25s3dbado10l0l2").unwrap(), None);
}

#[test]
fn test_bpchar_rewrite_for_jdbc() {
    let columns = vec![ColumnDescriptor::new("code", DataType::Bpchar, 0).with_type_modifiers(vec![3])];
    let connector = JdbcConnector::new(DbProduct::Postgres);

    let plain = PushdownCompiler::new(&connector, &columns);
    assert_eq!(plain.compile("a0c1042s1dAo5").unwrap().as_deref(), Some("code = 'A'"));

    let rewriting = PushdownCompiler::new(&connector, &columns).with_bpchar_rewrite(true);
    assert_eq!(
        rewriting.compile("a0c1042s1dAo5").unwrap().as_deref(),
        Some("(code = 'A' OR code = 'A  ')")
    );
    assert_eq!(
        rewriting.compile("a0c1042s1dAo6").unwrap().as_deref(),
        Some("(code <> 'A' AND code <> 'A  ')")
    );
}

#[test]
fn test_s3_select_prunes_unsupported_types() {
    let columns = vec![
        ColumnDescriptor::new("id", DataType::Integer, 0),
        ColumnDescriptor::new("price", DataType::Numeric, 1),
    ];
    let connector = S3SelectConnector::new(true);
    let compiler = PushdownCompiler::new(&connector, &columns)
        .with_supported_types(Some(S3SelectConnector::supported_types()));

    assert_eq!(
        compiler.compile("a0c23s1d5o2a1c1700s3d9.5o1l0").unwrap().as_deref(),
        Some("CAST (s._1 AS int) > 5")
    );
    assert_eq!(compiler.compile("a0c23s1d5o2a1c1700s3d9.5o1l1").unwrap(), None);
    // LIKE is not evaluated by S3 Select
    assert_eq!(compiler.compile("a0c23s1d5o7").unwrap(), None);
}

#[test]
fn test_hive_partition_filter() {
    let columns = vec![
        ColumnDescriptor::new("region", DataType::Text, 0),
        ColumnDescriptor::new("amount", DataType::Integer, 1),
    ];
    let connector = HivePartitionConnector::new(HashMap::from([(
        "region".to_string(),
        "string".to_string(),
    )]));
    let compiler = PushdownCompiler::new(&connector, &columns);

    assert_eq!(
        compiler.compile("a0c25s2dEUo5a1c23s3d100o2l0").unwrap().as_deref(),
        Some("region = \"EU\"")
    );
    assert_eq!(compiler.compile("a0c25s2dEUo5a1c23s3d100o2l1").unwrap(), None);
    // NOT is not part of the metastore filter language
    assert_eq!(compiler.compile("a0c25s2dEUo5l2").unwrap(), None);
}

#[test]
fn test_errors_propagate() {
    let columns = sales_columns();
    let connector = PredicateConnector::new();
    let compiler = PushdownCompiler::new(&connector, &columns);

    let err = compiler.compile("o100").unwrap_err();
    assert!(matches!(err, PushdownError::Syntax(_)));

    let err = compiler.compile("a9c20s1d1o5").unwrap_err();
    assert!(matches!(err, PushdownError::Connector(_)));
}

#[test]
fn test_compile_from_settings() {
    let settings = PushdownSettings::from_json(
        r#"{
            "connector": { "kind": "jdbc", "product": "oracle", "quote": "\"" },
            "columns": [ { "name": "code", "type": "bpchar", "modifiers": [2] },
                         { "name": "created", "type": "date" } ],
            "rewrite_bpchar": true
        }"#,
    )
    .unwrap()
    .validate()
    .unwrap();

    let compiler = PushdownCompiler::from_settings(&settings);
    assert_eq!(
        compiler.compile("a0c1042s1dXo5a1c1082s10d2020-01-31o4l0").unwrap().as_deref(),
        Some("((\"code\" = 'X' OR \"code\" = 'X ') AND \"created\" >= to_date('2020-01-31', 'YYYY-MM-DD'))")
    );
}

#[test]
fn test_compiling_twice_gives_the_same_text() {
    let columns = sales_columns();
    let connector = JdbcConnector::new(DbProduct::Postgres);
    let compiler = PushdownCompiler::new(&connector, &columns);
    let filter = "a0c20s1d1o5a3c25s1dAo5l1a1c25s10d2008-02-01o2l0";

    let first = compiler.compile(filter).unwrap();
    let second = compiler.compile(filter).unwrap();

    assert_eq!(
        first.as_deref(),
        Some("((id = 1 OR grade = 'A') AND cdate > date'2008-02-01')")
    );
    assert_eq!(first, second);
}

#[test]
fn test_column_to_column_comparison_fails_to_parse() {
    let columns = sales_columns();
    let connector = JdbcConnector::new(DbProduct::Postgres);

    let err = PushdownCompiler::new(&connector, &columns)
        .compile("a0a1o5a0c23s1d1o5l0")
        .unwrap_err();

    assert!(matches!(err, PushdownError::Syntax(_)));
}
