use crate::{
    catalog::hive::HivePartitionConnector,
    connector::FilterConnector,
    file::s3_select::S3SelectConnector,
    generic::PredicateConnector,
    sql::jdbc::JdbcConnector,
};

/// The connectors filters can be pushed down to.
#[derive(Debug, Clone)]
pub enum Connector {
    Jdbc(JdbcConnector),
    S3Select(S3SelectConnector),
    HivePartition(HivePartitionConnector),
    Predicate(PredicateConnector),
}

impl Connector {
    pub fn as_filter(&self) -> &dyn FilterConnector {
        match self {
            Connector::Jdbc(connector) => connector,
            Connector::S3Select(connector) => connector,
            Connector::HivePartition(connector) => connector,
            Connector::Predicate(connector) => connector,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Connector::Jdbc(_) => "jdbc",
            Connector::S3Select(_) => "s3-select",
            Connector::HivePartition(_) => "hive",
            Connector::Predicate(_) => "predicate",
        }
    }
}
