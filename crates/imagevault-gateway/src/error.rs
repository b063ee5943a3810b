//! Error types for gateway operations

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Caller-visible outcomes of a failed gateway operation
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Bucket missing, or no stored object matches the requested name.
    /// A normal negative result, not a fault.
    #[error("{message}")]
    NotFound { message: String },

    /// The storage service rejected a request or reported a fault. Status
    /// and message are the remote service's own, unmodified; no retry is
    /// attempted.
    #[error("storage service error: {message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },

    /// Any other unexpected failure, surfaced generically.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new remote-storage error
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Remote { .. } => "remote",
            Self::Internal { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err.to_string())
    }
}
