use thiserror::Error;

/// Result type for event publishing operations
pub type EventResult<T> = Result<T, EventError>;

/// Errors raised while validating, encoding or delivering a notification
#[derive(Error, Debug, Clone)]
pub enum EventError {
    /// Priority outside of `0..=7`
    #[error("Priority out of range: {value} (expected 0..=7)")]
    OutOfRange { value: i64 },

    /// Caller supplied an unusable argument (e.g. empty event name)
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// The backend connection could not be established
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    /// The backend rejected or timed out the list push
    #[error("Backend write failure: {0}")]
    BackendWriteFailure(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A frame could not be decoded
    #[error("Malformed frame: {0}")]
    MalformedFrame(String),
}

impl EventError {
    /// Create an out-of-range error for a priority value
    pub fn out_of_range(value: i64) -> Self {
        Self::OutOfRange { value }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(argument: &'static str, message: S) -> Self {
        Self::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Create a connection failure from any error type
    pub fn connection<E: std::fmt::Display>(error: E) -> Self {
        Self::ConnectionFailure(error.to_string())
    }

    /// Create a backend write failure from any error type
    pub fn backend_write<E: std::fmt::Display>(error: E) -> Self {
        Self::BackendWriteFailure(error.to_string())
    }

    /// Create a malformed frame error
    pub fn malformed<S: Into<String>>(reason: S) -> Self {
        Self::MalformedFrame(reason.into())
    }

    /// Environmental failures the caller may retry; input errors are not retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailure(_) | Self::BackendWriteFailure(_)
        )
    }
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::convert::Infallible> for EventError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
