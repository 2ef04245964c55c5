use connectors::{adapter::Connector, file::s3_select::S3SelectConnector};
use model::core::{column::ColumnDescriptor, data_type::DataType};
use std::collections::HashSet;

/// Immutable, validated configuration for compiling push-down filters.
#[derive(Debug, Clone)]
pub struct ValidatedSettings {
    /// Where filters are pushed down to
    pub connector: Connector,
    /// Columns of the external table, indexed by position
    pub columns: Vec<ColumnDescriptor>,
    /// Whether to expand comparisons on fixed-width character columns
    pub rewrite_bpchar: bool,
    /// Column types the source can filter on, if restricted
    pub supported_types: Option<HashSet<DataType>>,
    /// Whether the rendered filter is combined with a partition condition
    pub partitioned: bool,
}

impl ValidatedSettings {
    pub fn builder(connector: Connector, columns: Vec<ColumnDescriptor>) -> ValidatedSettingsBuilder {
        ValidatedSettingsBuilder {
            connector,
            columns,
            rewrite_bpchar: None,
            supported_types: None,
            partitioned: None,
        }
    }

    /// S3 Select can only compare the types it knows how to cast, so its
    /// settings restrict the column types unless told otherwise.
    pub fn from_builder(builder: ValidatedSettingsBuilder) -> Self {
        let supported_types = match (&builder.connector, builder.supported_types) {
            (_, Some(types)) => Some(types),
            (Connector::S3Select(_), None) => Some(S3SelectConnector::supported_types()),
            (_, None) => None,
        };

        Self {
            connector: builder.connector,
            columns: builder.columns,
            rewrite_bpchar: builder.rewrite_bpchar.unwrap_or(false),
            supported_types,
            partitioned: builder.partitioned.unwrap_or(false),
        }
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn rewrite_bpchar(&self) -> bool {
        self.rewrite_bpchar
    }

    pub fn supported_types(&self) -> Option<&HashSet<DataType>> {
        self.supported_types.as_ref()
    }

    pub fn partitioned(&self) -> bool {
        self.partitioned
    }
}

pub struct ValidatedSettingsBuilder {
    connector: Connector,
    columns: Vec<ColumnDescriptor>,
    rewrite_bpchar: Option<bool>,
    supported_types: Option<HashSet<DataType>>,
    partitioned: Option<bool>,
}

impl ValidatedSettingsBuilder {
    pub fn rewrite_bpchar(mut self, enabled: bool) -> Self {
        self.rewrite_bpchar = Some(enabled);
        self
    }

    pub fn supported_types(mut self, types: Option<HashSet<DataType>>) -> Self {
        self.supported_types = types;
        self
    }

    pub fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = Some(partitioned);
        self
    }
}
