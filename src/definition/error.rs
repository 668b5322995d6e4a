use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to list tree {}: {source}", .path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Error applying a rewrite intent to a definition document
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    #[error("Failed to parse document: {0}")]
    ParseFailed(String),

    #[error("Cannot rewrite {key}: {reason}")]
    UnsupportedShape { key: String, reason: String },
}
