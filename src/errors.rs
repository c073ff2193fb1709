use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file {path}: {reason}")]
    ConfigSave { path: PathBuf, reason: String },

    #[error("Failed to write telemetry: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode telemetry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("No tokio runtime available to drive the tick loop")]
    RuntimeUnavailable,
}
