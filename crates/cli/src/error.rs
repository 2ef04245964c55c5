use engine_config::settings::error::SettingsError;
use engine_processing::error::PushdownError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the settings file: {0}")]
    ConfigFileRead(#[from] std::io::Error),

    #[error("Invalid push-down settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to compile the filter: {0}")]
    Pushdown(#[from] PushdownError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("The --where flag only applies to the jdbc connector, not {0}")]
    WhereNotSupported(&'static str),
}
