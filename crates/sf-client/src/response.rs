//! HTTP response handling with Salesforce-specific extensions.

use std::sync::LazyLock;

use bytes::{Bytes, BytesMut};
use regex_lite::Regex;
use serde::de::DeserializeOwned;

use crate::call::CancelSignal;
use crate::error::{Error, ErrorKind, Result};

/// Wrapper around an HTTP response that enforces the body size limit.
///
/// A cancellation signal attached to the originating call keeps applying
/// while the body is read.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
    max_body_bytes: usize,
    cancel: Option<CancelSignal>,
}

impl Response {
    pub(crate) fn new(
        inner: reqwest::Response,
        max_body_bytes: usize,
        cancel: Option<CancelSignal>,
    ) -> Self {
        Self {
            inner,
            max_body_bytes,
            cancel,
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Read the whole body, failing once it exceeds the configured limit.
    pub async fn bytes(mut self) -> Result<Bytes> {
        let limit = self.max_body_bytes;
        if let Some(length) = self.inner.content_length() {
            if length > limit as u64 {
                return Err(Error::new(ErrorKind::ResponseTooLarge { limit }));
            }
        }

        let mut body = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(Error::new(ErrorKind::ResponseTooLarge { limit }));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        match &self.cancel {
            Some(cancel) => tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(Error::new(ErrorKind::Cancelled)),
                chunk = self.inner.chunk() => chunk.map_err(Into::into),
            },
            None => self.inner.chunk().await.map_err(Into::into),
        }
    }

    /// Get the response body as text (lossy UTF-8).
    pub async fn text(self) -> Result<String> {
        let body = self.bytes().await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }
}

/// Extension trait for processing Salesforce API responses.
pub trait ResponseExt: Sized {
    /// Pass 2xx responses through; turn anything else into a typed error.
    fn check_salesforce_error(self) -> impl std::future::Future<Output = Result<Self>> + Send;
}

impl ResponseExt for Response {
    async fn check_salesforce_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = match self.text().await {
            Ok(body) => body,
            Err(err) if err.is_transport() => return Err(err),
            Err(_) => String::new(),
        };
        Err(parse_error_response(status, &body))
    }
}

/// Map a non-success status and body to the matching error kind.
pub(crate) fn parse_error_response(status: u16, body: &str) -> Error {
    // Salesforce REST errors arrive as an array of {errorCode, message, fields}
    if let Ok(errors) = serde_json::from_str::<Vec<SalesforceErrorResponse>>(body) {
        if let Some(err) = errors.into_iter().next() {
            return Error::new(err.into_kind());
        }
    }

    if let Ok(err) = serde_json::from_str::<SalesforceErrorResponse>(body) {
        return Error::new(err.into_kind());
    }

    let sanitized = if body.trim().is_empty() {
        format!("status {status}")
    } else {
        sanitize_error_message(body)
    };
    let kind = match status {
        401 => ErrorKind::Authentication(sanitized),
        403 => ErrorKind::Authorization(sanitized),
        404 => ErrorKind::NotFound(sanitized),
        _ => ErrorKind::Http {
            status,
            message: sanitized,
        },
    };

    Error::new(kind)
}

// Salesforce tokens are the 15+ char org id, '!', then the session part
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"00[A-Za-z0-9]{13,}![A-Za-z0-9_.]+").unwrap());
static SESSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sid=[A-Za-z0-9]{20,}").unwrap());

/// Sanitize an error message before it is stored in an error or logged.
///
/// Redacts anything shaped like an access token (`00D...!...`) or a session
/// id, and truncates to 500 bytes.
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = TOKEN_PATTERN.replace_all(message, "[REDACTED_TOKEN]");
    let mut sanitized = SESSION_PATTERN
        .replace_all(&sanitized, "sid=[REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Salesforce API error response format.
#[derive(Debug, serde::Deserialize)]
struct SalesforceErrorResponse {
    #[serde(alias = "errorCode", alias = "statusCode")]
    error_code: String,
    message: String,
    fields: Option<Vec<String>>,
}

impl SalesforceErrorResponse {
    fn into_kind(self) -> ErrorKind {
        ErrorKind::SalesforceApi {
            error_code: self.error_code,
            message: sanitize_error_message(&self.message),
            fields: self.fields.unwrap_or_default(),
        }
    }
}
