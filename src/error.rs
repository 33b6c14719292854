//! Error types for strata
//!
//! Uses `thiserror` for library errors. Every build error is fatal: strata is
//! a one-shot, human-triggered build step, so failures surface immediately
//! instead of being retried or degraded.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for strata operations
pub type StrataResult<T> = Result<T, StrataError>;

/// Main error type for strata operations
#[derive(Error, Debug)]
pub enum StrataError {
    /// A declared layer source directory does not exist at build time
    #[error("missing layer source '{path}' - run the client build step first")]
    MissingSource { path: PathBuf },

    /// Source path exists but is not a directory
    #[error("layer source '{path}' is not a directory")]
    SourceNotADirectory { path: PathBuf },

    /// Required environment variable is unset
    #[error("environment variable '{var}' is required in local mode")]
    MissingEnvVar { var: String },

    /// Invalid stack configuration file
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error (deletion/creation/copy denied, and similar)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest serialization error
    #[error("manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Walk error while traversing a layer source
    #[error("failed to traverse layer source: {0}")]
    Walk(#[from] ignore::Error),
}
