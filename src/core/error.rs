//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A composite value refers back to one of its ancestors
    #[error("Converting circular structure to JSON at '{path}'")]
    CircularReference { path: String },

    /// Hook registered under an event name the logger does not emit
    #[error("Invalid hook event '{name}', expected one of: {expected}")]
    InvalidHookEvent { name: String, expected: String },

    /// Extension name that is not a usable identifier
    #[error("Invalid extension name '{name}': {reason}")]
    InvalidExtensionName { name: String, reason: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a circular reference error for the given key path
    pub fn circular(path: impl Into<String>) -> Self {
        LoggerError::CircularReference { path: path.into() }
    }

    pub fn invalid_hook_event(name: impl Into<String>, expected: impl Into<String>) -> Self {
        LoggerError::InvalidHookEvent {
            name: name.into(),
            expected: expected.into(),
        }
    }

    pub fn invalid_extension_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::InvalidExtensionName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }

    /// Whether this error came from a reference cycle during serialization
    pub fn is_circular(&self) -> bool {
        matches!(self, LoggerError::CircularReference { .. })
    }
}
