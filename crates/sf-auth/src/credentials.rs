//! Client credentials and access credentials.
//!
//! Both types implement Debug by hand so secrets never reach logs.

use crate::error::{Error, ErrorKind, Result};

/// Connected-app credentials for the OAuth 2.0 client-credentials flow.
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl ClientCredentials {
    /// Create credentials from a consumer key and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required:
    /// - `SF_CLIENT_ID` or `SALESFORCE_CLIENT_ID`
    /// - `SF_CLIENT_SECRET` or `SALESFORCE_CLIENT_SECRET`
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("SF_CLIENT_ID")
            .or_else(|_| std::env::var("SALESFORCE_CLIENT_ID"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("SF_CLIENT_ID".to_string())))?;

        let client_secret = std::env::var("SF_CLIENT_SECRET")
            .or_else(|_| std::env::var("SALESFORCE_CLIENT_SECRET"))
            .map_err(|_| Error::new(ErrorKind::EnvVar("SF_CLIENT_SECRET".to_string())))?;

        Ok(Self::new(client_id, client_secret))
    }

    /// Consumer key.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

/// An OAuth access token together with its scheme.
///
/// Sent as `Authorization: {token_type} {access_token}`.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCredential {
    token_type: String,
    access_token: String,
}

impl std::fmt::Debug for AccessCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessCredential")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl AccessCredential {
    /// Create a credential from a scheme and token.
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: access_token.into(),
        }
    }

    /// Shorthand for a `Bearer` credential.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new("Bearer", access_token)
    }

    /// Parse a full header value such as `"Bearer 00D..."`.
    pub fn parse(header_value: &str) -> Result<Self> {
        match header_value.trim().split_once(' ') {
            Some((scheme, token)) if !scheme.is_empty() && !token.trim().is_empty() => {
                Ok(Self::new(scheme, token.trim()))
            }
            _ => Err(Error::new(ErrorKind::InvalidCredentials(
                "expected \"<scheme> <token>\"".to_string(),
            ))),
        }
    }

    /// Token scheme, usually `Bearer`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// The raw access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}
