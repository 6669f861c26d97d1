//! Error types for the clause front end.

use thiserror::Error;

/// Main error type for clause operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClauseError {
    /// User input was rejected before any request was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No usable session is available.
    #[error("Authentication required: {0}")]
    Auth(String),

    /// The identity provider rejected an operation.
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// The request failed or the server answered with a non-success status.
    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    /// The response did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Payload(String),

    /// A local file operation failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Coarse category of a [`ClauseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    Provider,
    Transport,
    Payload,
    Io,
}

impl ClauseError {
    /// Build a transport error from a response status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ClauseError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Build a transport error for a request that never got a response.
    pub fn transport(message: impl Into<String>) -> Self {
        ClauseError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClauseError::Validation(_) => ErrorKind::Validation,
            ClauseError::Auth(_) => ErrorKind::Auth,
            ClauseError::Provider(_) => ErrorKind::Provider,
            ClauseError::Transport { .. } => ErrorKind::Transport,
            ClauseError::Payload(_) => ErrorKind::Payload,
            ClauseError::Io(_) => ErrorKind::Io,
        }
    }

    /// The text shown to the user, without the category prefix.
    pub fn user_message(&self) -> &str {
        match self {
            ClauseError::Validation(message)
            | ClauseError::Auth(message)
            | ClauseError::Provider(message)
            | ClauseError::Payload(message)
            | ClauseError::Io(message) => message,
            ClauseError::Transport { message, .. } => message,
        }
    }

    /// HTTP status attached to a transport error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClauseError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

/// Convenience Result type for clause operations.
pub type Result<T> = std::result::Result<T, ClauseError>;

impl From<serde_json::Error> for ClauseError {
    fn from(err: serde_json::Error) -> Self {
        ClauseError::Payload(err.to_string())
    }
}

impl From<std::io::Error> for ClauseError {
    fn from(err: std::io::Error) -> Self {
        ClauseError::Io(err.to_string())
    }
}
