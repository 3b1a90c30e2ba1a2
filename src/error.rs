//! Error types for listmonk API operations.

use thiserror::Error;

/// Errors that can occur during listmonk API operations.
#[derive(Debug, Error)]
pub enum ListmonkError {
    /// Configuration is missing or incomplete.
    #[error("listmonk configuration required: {0}")]
    ConfigMissing(String),

    /// The server answered with a non-success status and an error envelope.
    #[error("{message}")]
    Api { message: String, status_code: u16 },

    /// The server answered with a non-success status and a body that is not
    /// an error envelope.
    #[error("HTTP {status_code} with undecodable error body: {source}")]
    MalformedError {
        status_code: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request was cancelled before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// Query parameters could not be encoded.
    #[error("Failed to encode query parameters: {0}")]
    QueryEncode(String),

    /// A multipart part could not be built, e.g. an invalid MIME type.
    #[error("Failed to encode multipart body: {0}")]
    MultipartEncode(String),

    /// Request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Successful response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local I/O error (reading an upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ListmonkError {
    /// HTTP status code carried by protocol errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ListmonkError::Api { status_code, .. }
            | ListmonkError::MalformedError { status_code, .. } => Some(*status_code),
            ListmonkError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server reported the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for listmonk operations.
pub type Result<T> = core::result::Result<T, ListmonkError>;
