//! Error handling for tmpl-gather.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors raised while resolving template sources and targets.
#[derive(Error, Debug)]
pub enum Error {
    /// Unclassified I/O failure.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A source path or input directory does not exist.
    #[error("Path '{path}' does not exist.")]
    NotFound { path: String },

    /// The path exists but its content could not be read.
    #[error("Failed to read '{path}': {source}.")]
    ReadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A destination could not be created or opened.
    #[error("Failed to open '{path}' for writing: {source}.")]
    WriteError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Inconsistent configuration or a malformed exclusion pattern.
    #[error("Configuration error: {0}.")]
    ConfigError(String),
}

/// Coarse error category, for callers that only branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ReadError,
    WriteError,
    ConfigError,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IoError(_) => ErrorKind::Io,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::ReadError { .. } => ErrorKind::ReadError,
            Error::WriteError { .. } => ErrorKind::WriteError,
            Error::ConfigError(_) => ErrorKind::ConfigError,
        }
    }

    pub(crate) fn not_found(path: &Path) -> Self {
        Error::NotFound { path: path.display().to_string() }
    }

    /// Classifies a failed read: a missing path becomes `NotFound`,
    /// anything else `ReadError`.
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Error::not_found(path)
        } else {
            Error::ReadError { path: path.display().to_string(), source }
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Error::WriteError { path: path.display().to_string(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
