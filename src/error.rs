//! Error types.

use thiserror::Error;

/// Errors that can occur while loading the raw record resource.
///
/// These never escape a [`DataSource`](crate::source::DataSource): sources log
/// them, keep the message for display and deliver an empty payload instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// The request could not be sent or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The body is not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body is valid JSON but not an array.
    #[error("Data is not an array")]
    NotAnArray,

    /// Reading a local file failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LoadError::Timeout
        } else if let Some(status) = err.status() {
            LoadError::Status(status.as_u16())
        } else {
            LoadError::Transport(err.to_string())
        }
    }
}

/// Why a raw candidate was rejected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("candidate is not an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// A search pattern that is not a valid regular expression.
#[derive(Debug, Clone, Error)]
#[error("invalid search pattern: {0}")]
pub struct CompileError(#[from] pub regex::Error);
