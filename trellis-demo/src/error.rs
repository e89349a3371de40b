use std::path::PathBuf;

use thiserror::Error;
use trellis::ConfigError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
