//! Error types for Hobbes
//!
//! Uses `thiserror` for library errors; the binary surface wraps these in
//! `anyhow::Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Hobbes operations
pub type HobbesResult<T> = Result<T, HobbesError>;

/// Main error type for Hobbes operations
#[derive(Error, Debug)]
pub enum HobbesError {
    /// Missing or malformed configuration (including backend options)
    #[error("invalid configuration: {message}")]
    ConfigInvalid { message: String },

    /// Unit or asset name absent from the configuration
    #[error("config for '{name}' not found in artifacts configuration")]
    UnitNotFound { name: String },

    /// Project root or tracked directory missing on disk
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Git subprocess exited non-zero or could not be spawned
    #[error("git failed: {message}")]
    GitFailed { message: String },

    /// Build command exited non-zero
    #[error("command '{command}' failed: {status}")]
    CommandFailed { command: String, status: String },

    /// Repository entry absent on retrieve
    #[error("artifact '{name}' not found in repository")]
    ArtifactMissing { name: String },

    /// Object storage transport or auth failure (distinct from not-found)
    #[error("repository backend error: {message}")]
    Backend { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
