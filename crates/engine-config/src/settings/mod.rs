use connector::ConnectorSettings;
use error::SettingsError;
use model::core::{column::ColumnDescriptor, data_type::DataType};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};
use tracing::{debug, info};
use validated::ValidatedSettings;

pub mod connector;
pub mod error;
pub mod validated;

/// One column of the external table, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSettings {
    pub name: String,
    /// Postgres type name (`int4`, `varchar`, `_text`) or numeric OID.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Type modifiers, e.g. `[3]` for `CHAR(3)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<i32>>,
}

/// Push-down settings as they appear in a JSON settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushdownSettings {
    pub connector: ConnectorSettings,
    pub columns: Vec<ColumnSettings>,
    #[serde(default)]
    pub rewrite_bpchar: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_types: Option<Vec<String>>,
}

impl PushdownSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded push-down settings");
        Self::from_json(&json)
    }

    /// Resolves column types and builds the connector.
    pub fn validate(&self) -> Result<ValidatedSettings, SettingsError> {
        let columns = self.column_descriptors()?;
        let connector = self.connector.build()?;

        let supported_types = match &self.supported_types {
            Some(names) => Some(
                names
                    .iter()
                    .map(|name| {
                        DataType::from_postgres_type(name)
                            .map_err(|_| SettingsError::UnknownSupportedType(name.clone()))
                    })
                    .collect::<Result<HashSet<_>, _>>()?,
            ),
            None => None,
        };

        info!(
            connector = connector.name(),
            columns = columns.len(),
            rewrite_bpchar = self.rewrite_bpchar,
            "Validated push-down settings"
        );

        Ok(ValidatedSettings::from_builder(
            ValidatedSettings::builder(connector, columns)
                .rewrite_bpchar(self.rewrite_bpchar)
                .supported_types(supported_types)
                .partitioned(self.connector.is_partitioned()),
        ))
    }

    fn column_descriptors(&self) -> Result<Vec<ColumnDescriptor>, SettingsError> {
        let mut seen = HashSet::new();
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                if !seen.insert(column.name.as_str()) {
                    return Err(SettingsError::DuplicateColumn(column.name.clone()));
                }

                let data_type = DataType::from_postgres_type(&column.type_name).map_err(|message| {
                    SettingsError::UnknownColumnType {
                        column: column.name.clone(),
                        message,
                    }
                })?;

                let mut descriptor = ColumnDescriptor::new(column.name.clone(), data_type, index);
                descriptor.type_name = column.type_name.clone();
                if let Some(modifiers) = &column.modifiers {
                    descriptor = descriptor.with_type_modifiers(modifiers.clone());
                }
                Ok(descriptor)
            })
            .collect()
    }
}
