use thiserror::Error;

/// Top-level error type for orgbot infrastructure concerns.
///
/// Domain crates define their own error types for domain failures
/// (validation, rejected input); this type covers configuration and I/O.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// A specialized `Result` type for orgbot infrastructure operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Failure reported by any of the remote service boundaries.
///
/// The `Display` output is the human-readable reason; chat sessions wrap it
/// into the synthesized error turn, so it must read well on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service could not be reached.
    #[error("{0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {secs} seconds")]
    Timeout { secs: u64 },

    /// The service answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The service answered successfully but the body was not understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    /// HTTP status code, when the failure came from a service response.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
