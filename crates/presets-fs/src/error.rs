//! Error types for presets-fs

use std::path::PathBuf;

/// Result type for presets-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading preset files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse JSON in {path}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a parse error from a `serde_json` failure, keeping its location.
    pub fn parse(path: impl Into<PathBuf>, err: &serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }

    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
