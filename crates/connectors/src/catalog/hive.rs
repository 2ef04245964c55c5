//! Partition filters for the Hive metastore.
//!
//! The metastore can only list the partitions matching a filter such as
//! `part1 = "AAAA" and part2 = "1111"`, so only comparisons on partition
//! keys are pushed down. With `P` a comparison on a usable partition key and
//! `NP` anything else:
//!
//! - `P <op> P` stays as is
//! - `P AND NP` becomes `P`
//! - `P OR NP` and `NP <op> NP` are not pushed down

use crate::{
    capabilities::FilterCapabilities, connector::FilterConnector, error::ConnectorResult,
};
use model::{
    core::column::ColumnDescriptor,
    filter::operator::{Operator, OperatorSet},
};
use std::collections::HashMap;
use tracing::trace;

const STRING_TYPE_NAME: &str = "string";
const INTEGRAL_TYPE_NAMES: [&str; 4] = ["tinyint", "smallint", "int", "bigint"];

#[derive(Debug, Clone, Default)]
pub struct HivePartitionConnector {
    /// Partition key name to its Hive type name.
    partition_keys: HashMap<String, String>,
    push_down_integral: bool,
}

impl HivePartitionConnector {
    pub fn new(partition_keys: HashMap<String, String>) -> Self {
        Self {
            partition_keys,
            push_down_integral: false,
        }
    }

    /// Lets `=` and `<>` on integral partition keys through, for metastores
    /// configured with `hive.metastore.integral.jdo.pushdown`.
    pub fn with_integral_push_down(mut self, enabled: bool) -> Self {
        self.push_down_integral = enabled;
        self
    }
}

impl FilterConnector for HivePartitionConnector {
    fn capabilities(&self) -> FilterCapabilities {
        FilterCapabilities::new(
            OperatorSet::ORDERING | OperatorSet::EQUALITY,
            OperatorSet::AND | OperatorSet::OR,
        )
    }

    fn is_filter_compatible(
        &self,
        column_name: &str,
        _column: &ColumnDescriptor,
        operator: Operator,
        _logical: Option<Operator>,
    ) -> bool {
        let Some(key_type) = self.partition_keys.get(column_name) else {
            trace!(column = %column_name, "Filter is on a non-partition column, ignoring it");
            return false;
        };

        let integral_supported = self.push_down_integral
            && matches!(operator, Operator::Equals | Operator::NotEquals);
        let key_type = key_type.to_ascii_lowercase();
        let compatible = key_type == STRING_TYPE_NAME
            || (integral_supported && INTEGRAL_TYPE_NAMES.contains(&key_type.as_str()));

        if !compatible {
            trace!(column = %column_name, %key_type, %operator, "Partition column is not supported for push-down, ignoring it");
        }
        compatible
    }

    fn is_compliant_with_operator(&self, operator: Operator) -> bool {
        operator != Operator::Or
    }

    fn map_value(&self, value: &str, _column: &ColumnDescriptor) -> ConnectorResult<String> {
        Ok(format!("\"{}\"", value.replace('"', "\\\"")))
    }
}
