use serde::Serialize;
use thiserror::Error;

/// Message shown when the document store cannot be reached or answers with
/// something we cannot read.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to server.";

/// Message shown when a store call does not complete in time.
pub const TIMEOUT_ERROR_MESSAGE: &str = "Timed out waiting for server.";

/// Failure reported by a document store call (list, save or overwrite).
///
/// Stores never panic or throw on transport problems; they hand back one of
/// these so the workflow can tell the user and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a store error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The store could not be reached or returned an unreadable answer.
    pub fn connection() -> Self {
        Self::new(CONNECTION_ERROR_MESSAGE)
    }

    /// The store did not answer within the configured timeout.
    pub fn timeout() -> Self {
        Self::new(TIMEOUT_ERROR_MESSAGE)
    }

    /// Human-readable message for the user.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Unified error type for docname operations
#[derive(Debug, Error)]
pub enum DocnameError {
    // Name errors
    #[error("Invalid document name: '{0}'")]
    InvalidName(String),

    // Store errors
    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    // Workflow errors
    #[error("A rename is already in progress")]
    Busy,

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for docname operations
pub type Result<T> = std::result::Result<T, DocnameError>;

/// A serializable representation of DocnameError for the browser host
#[derive(Debug, Clone, Serialize)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&DocnameError> for SerializableError {
    fn from(err: &DocnameError) -> Self {
        let kind = match err {
            DocnameError::InvalidName(_) => "InvalidName",
            DocnameError::Store(_) => "Store",
            DocnameError::Busy => "Busy",
            DocnameError::ConfigParse(_) => "ConfigParse",
            DocnameError::ConfigSerialize(_) => "ConfigSerialize",
            DocnameError::NoConfigDir => "NoConfigDir",
            DocnameError::Io(_) => "Io",
        }
        .to_string();

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<DocnameError> for SerializableError {
    fn from(err: DocnameError) -> Self {
        SerializableError::from(&err)
    }
}

impl DocnameError {
    /// Convert to a serializable representation for the host
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }
}
