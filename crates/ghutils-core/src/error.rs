//! Error types for ghutils-core.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ghutils-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file parsing error.
    #[error("failed to parse {file}: {message}")]
    ConfigParse { file: PathBuf, message: String },

    /// Config could not be written as TOML.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Unrecognised footer kind.
    #[error("unknown footer kind '{0}' (expected 'marketplace' or 'app')")]
    UnknownFooterKind(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
