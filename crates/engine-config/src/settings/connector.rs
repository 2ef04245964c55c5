use super::error::SettingsError;
use connectors::{
    adapter::Connector,
    catalog::hive::HivePartitionConnector,
    file::s3_select::S3SelectConnector,
    generic::PredicateConnector,
    sql::{dialect::DbProduct, jdbc::JdbcConnector},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The `connector` section of a settings document, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConnectorSettings {
    Jdbc {
        /// Database product; detected from `driver` when absent.
        #[serde(default)]
        product: Option<DbProduct>,
        #[serde(default)]
        driver: Option<String>,
        #[serde(default)]
        quote: String,
        #[serde(default)]
        has_partition: bool,
    },
    S3Select {
        #[serde(default)]
        use_position: bool,
    },
    Hive {
        /// Partition key name to Hive type name (`string`, `int`, ...).
        partition_keys: HashMap<String, String>,
        #[serde(default)]
        push_down_integral: bool,
    },
    Predicate {
        #[serde(default)]
        quote: String,
    },
}

impl ConnectorSettings {
    pub fn build(&self) -> Result<Connector, SettingsError> {
        let connector = match self {
            ConnectorSettings::Jdbc {
                product,
                driver,
                quote,
                ..
            } => {
                let product = match (product, driver) {
                    (Some(product), _) => *product,
                    (None, Some(driver)) => DbProduct::detect(driver),
                    (None, None) => DbProduct::Other,
                };
                Connector::Jdbc(JdbcConnector::new(product).with_quote(quote.as_str()))
            }
            ConnectorSettings::S3Select { use_position } => {
                Connector::S3Select(S3SelectConnector::new(*use_position))
            }
            ConnectorSettings::Hive {
                partition_keys,
                push_down_integral,
            } => {
                if partition_keys.is_empty() {
                    return Err(SettingsError::InvalidConnector(
                        "hive connector needs at least one partition key".into(),
                    ));
                }
                Connector::HivePartition(
                    HivePartitionConnector::new(partition_keys.clone())
                        .with_integral_push_down(*push_down_integral),
                )
            }
            ConnectorSettings::Predicate { quote } => {
                Connector::Predicate(PredicateConnector::new().with_quote(quote.as_str()))
            }
        };
        Ok(connector)
    }

    /// Whether rendered filters are combined with a partition range condition.
    pub fn is_partitioned(&self) -> bool {
        matches!(self, ConnectorSettings::Jdbc { has_partition: true, .. })
    }
}
