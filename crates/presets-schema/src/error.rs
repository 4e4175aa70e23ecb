//! Error types for presets-schema

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported schema version: {version}")]
    UnsupportedVersion { version: i64 },

    #[error("Schema for version {version} is unavailable: {reason}")]
    Unavailable { version: u32, reason: String },

    #[error("{message}")]
    Invalid { message: String },

    #[error("Invalid schema: {message}")]
    BadSchema { message: String },
}
