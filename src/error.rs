use thiserror::Error;

/// Unified error type for the crate.
///
/// This aggregates low-level failures into actionable, high-level categories.
/// Remote failures are surfaced as-is; nothing here retries or recovers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote error: HTTP {status}: {message}")]
    Remote { status: u16, message: String },
}

impl Error {
    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a new runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::Runtime(msg.into())
    }

    /// Whether this error was produced before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::Validation(_) | Error::Serialization(_)
        )
    }
}
