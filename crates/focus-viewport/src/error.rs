//! Error types
//!
//! Nothing in the viewport is fatal. `FocusError` is recovered by the
//! session (focus stays where it was); `ViewportError` only surfaces while
//! loading configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::NodeId;

/// Rejected focus transition
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FocusError {
    #[error("Node {0} is not part of the diagram")]
    UnknownNode(NodeId),
}

/// Configuration loading / validation failures
#[derive(Debug, Error)]
pub enum ViewportError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

/// Result type for configuration operations
pub type ViewportResult<T> = Result<T, ViewportError>;
