use thiserror::Error;

/// Errors raised when loading or validating push-down settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid JSON for the expected shape.
    #[error("Invalid settings document: {0}")]
    Json(#[from] serde_json::Error),

    /// A column type is neither a known type name nor a known OID.
    #[error("Column '{column}': {message}")]
    UnknownColumnType { column: String, message: String },

    /// An entry of `supported_types` could not be resolved.
    #[error("Unknown supported type: {0}")]
    UnknownSupportedType(String),

    /// Two columns share the same name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// The connector section is inconsistent.
    #[error("Invalid connector settings: {0}")]
    InvalidConnector(String),
}
