//! Error types for the osuguide library

use std::io;

/// Library error type for osuguide operations
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// The input is not an osu! beatmap (wrong extension or missing header)
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The beatmap could not be opened or read
    #[error("I/O failure: {0}")]
    IoFailure(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl From<io::Error> for GuideError {
    fn from(error: io::Error) -> Self {
        Self::IoFailure(error.to_string())
    }
}
