use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or validating a `TrellisConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Failure of a caller-supplied renderer (separator, badge, empty state).
///
/// Widgets never propagate these. The failure is logged and the built-in
/// markup is used instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Failed(String),

    #[error("missing data: {0}")]
    MissingData(&'static str),
}
