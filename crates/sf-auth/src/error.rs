//! Error types for sforce-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

use sforce_client::ErrorKind as ClientErrorKind;

/// Result type alias for sforce-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sforce-auth operations.
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

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The OAuth `error` code if the token endpoint rejected the request.
    pub fn oauth_error(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::OAuth { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns true if no HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(&self.kind, ErrorKind::Client(kind) if kind.is_transport())
    }

    /// Returns true if the token response could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(
            &self.kind,
            ErrorKind::Json(_) | ErrorKind::Client(ClientErrorKind::Json(_))
        )
    }
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The token endpoint refused to issue a token.
    ///
    /// Displays as the bare OAuth error code (e.g. `invalid_client`).
    #[error("{error}")]
    OAuth {
        error: String,
        description: Option<String>,
    },

    /// Transport, status or decode failure from the HTTP layer.
    #[error("{0}")]
    Client(ClientErrorKind),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),
}

impl From<sforce_client::Error> for Error {
    fn from(err: sforce_client::Error) -> Self {
        Self {
            kind: ErrorKind::Client(err.kind),
            source: err.source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
