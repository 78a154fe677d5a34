//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::editable::{Position, TokenId};

/// Mutation error. Always recoverable: callers treat it as a no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Token `{id}` not found at position {position}")]
    NotFound { id: TokenId, position: Position },
}

/// Configuration and catalog loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config directory available")]
    NoConfigDir,

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}
