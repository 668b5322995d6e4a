use thiserror::Error;

use crate::upstream::error::ApiError;

/// Problems with a package's autobump labels
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required label: {0}")]
    MissingLabel(&'static str),

    #[error("Invalid JSON in label {label}: {source}")]
    InvalidJson {
        label: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid replace pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error)]
pub enum BumpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Strategy {strategy} failed: {source}")]
    Strategy {
        strategy: String,
        #[source]
        source: ApiError,
    },
}
