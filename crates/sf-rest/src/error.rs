//! Error types for sforce-rest.

use sforce_client::ErrorKind as ClientErrorKind;

/// Result type alias for sforce-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sforce-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Returns true if no HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(&self.kind, ErrorKind::Client(kind) if kind.is_transport())
    }

    /// Returns true if a response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(&self.kind, ErrorKind::Client(ClientErrorKind::Json(_)))
    }

    /// Salesforce error code, from either an error payload or a
    /// `success: false` result.
    pub fn error_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Salesforce { error_code, .. }
            | ErrorKind::Client(ClientErrorKind::SalesforceApi { error_code, .. }) => {
                Some(error_code)
            }
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Transport, status or decode failure from the HTTP layer.
    #[error("{0}")]
    Client(ClientErrorKind),

    /// The API answered 2xx but reported the operation as failed.
    #[error("Salesforce error: {error_code} - {message}")]
    Salesforce { error_code: String, message: String },

    /// Rejected before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sforce_client::Error> for Error {
    fn from(err: sforce_client::Error) -> Self {
        Self {
            kind: ErrorKind::Client(err.kind),
            source: err.source,
        }
    }
}
