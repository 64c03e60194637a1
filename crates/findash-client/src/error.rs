//! Error types for findash-client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for backend client errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientErrorCode {
    /// Backend returned a non-success status
    BackendStatus,
    /// Request never completed (connect, timeout, TLS)
    Transport,
    /// Response body did not match the expected shape
    DecodeError,
}

impl std::fmt::Display for ClientErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientErrorCode::BackendStatus => write!(f, "BACKEND_STATUS"),
            ClientErrorCode::Transport => write!(f, "TRANSPORT"),
            ClientErrorCode::DecodeError => write!(f, "DECODE_ERROR"),
        }
    }
}

/// Backend client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend returned {status} for {method} {path}")]
    BackendStatus {
        status: u16,
        method: &'static str,
        path: String,
    },

    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode backend response: {reason}")]
    DecodeError { reason: String },
}

impl ClientError {
    /// Get the error code
    pub fn code(&self) -> ClientErrorCode {
        match self {
            ClientError::BackendStatus { .. } => ClientErrorCode::BackendStatus,
            ClientError::Transport(_) => ClientErrorCode::Transport,
            ClientError::DecodeError { .. } => ClientErrorCode::DecodeError,
        }
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
