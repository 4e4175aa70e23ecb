//! Error types for presets-core

use std::path::PathBuf;

/// Result type for presets-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a presets tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document could not be read from disk
    #[error("Unable to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON
    #[error("Unable to parse JSON in {path}: {message}")]
    FileParse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The main document has no `version` field
    #[error("Missing version in {file}; minimum required is 2")]
    MissingVersion { file: String },

    /// The main document declares a version below 2
    #[error("Unsupported version {version} in {file}, minimum required is 2")]
    UnsupportedVersion { file: String, version: i64 },

    /// The `version` field is not an integer
    #[error("Invalid version {found} in {file}; expected an integer")]
    InvalidVersion { file: String, found: String },

    /// No `CMakePresets.json` at the requested location
    #[error("No CMakePresets.json found at {path}")]
    PresetsNotFound { path: PathBuf },

    /// The main document does not match its schema
    #[error("Schema validation failed for {file}: {message}")]
    SchemaValidation { file: String, message: String },

    // Transparent wrappers for underlying crate errors
    /// Schema error from presets-schema
    #[error(transparent)]
    Schema(#[from] presets_schema::Error),
}

impl Error {
    /// The document could not be read.
    pub fn is_read_error(&self) -> bool {
        matches!(self, Self::FileRead { .. })
    }

    /// The document is not well-formed JSON.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::FileParse { .. })
    }

    /// The document version is missing, malformed or too old.
    pub fn is_version_error(&self) -> bool {
        matches!(
            self,
            Self::MissingVersion { .. } | Self::UnsupportedVersion { .. } | Self::InvalidVersion { .. }
        )
    }
}

impl From<presets_fs::Error> for Error {
    fn from(err: presets_fs::Error) -> Self {
        match err {
            presets_fs::Error::Io { path, source } => Self::FileRead { path, source },
            presets_fs::Error::Parse {
                path,
                line,
                column,
                message,
            } => Self::FileParse {
                path,
                line,
                column,
                message,
            },
        }
    }
}
