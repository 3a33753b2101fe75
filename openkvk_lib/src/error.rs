//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream transport errors
/// and adding configuration, argument, and payload failures.
#[derive(Debug)]
pub enum OpenKvkError {
    /// An error from the underlying API client. Aborts the whole request.
    Api(openkvk_api::Error),
    /// The requested response format is not one the client can produce.
    UnsupportedFormat(String),
    /// An argument could not be read as the type the operation needs.
    InvalidType(String),
    /// A lookup was called without any of the parameters it requires.
    MissingParameter(String),
    /// A page body did not have the expected envelope shape.
    MalformedPage { page: usize, reason: String },
    /// JSON serialization of the merged result failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for OpenKvkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::UnsupportedFormat(value) => {
                write!(f, "Unsupported response format '{}'", value)
            }
            Self::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
            Self::MissingParameter(msg) => write!(f, "Missing parameter: {}", msg),
            Self::MalformedPage { page, reason } => {
                write!(f, "Malformed response for page {}: {}", page, reason)
            }
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for OpenKvkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<openkvk_api::Error> for OpenKvkError {
    fn from(e: openkvk_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<serde_json::Error> for OpenKvkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}

impl From<openkvk_api::InvalidField> for OpenKvkError {
    fn from(e: openkvk_api::InvalidField) -> Self {
        Self::InvalidInput(e.to_string())
    }
}
