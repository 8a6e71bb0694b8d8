//! HTTP request building with Salesforce-specific headers.

use bytes::Bytes;
use serde::Serialize;

use crate::call::CallOptions;
use crate::error::Result;

/// Content type used for JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Content type used for OAuth form bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// Builder for HTTP requests.
///
/// Headers keep insertion order; setting a header that already exists
/// replaces its value.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Bytes>,
    pub(crate) options: CallOptions,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            options: CallOptions::default(),
        }
    }

    /// HTTP method of the request.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Target URL of the request.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Look up a header value (case-insensitive).
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Request body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Add or replace a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Set the `Authorization` header verbatim (e.g. `"Bearer 00D..."`).
    pub fn authorization(self, credential: impl Into<String>) -> Self {
        self.header("Authorization", credential)
    }

    /// Set `Accept: application/json`.
    pub fn accept_json(self) -> Self {
        self.header("Accept", "application/json")
    }

    /// Set a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let encoded = serde_json::to_vec(body)?;
        self.body = Some(Bytes::from(encoded));
        Ok(self.header("Content-Type", JSON_CONTENT_TYPE))
    }

    /// Set a form-encoded body.
    pub fn form<T: Serialize + ?Sized>(mut self, data: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(data)?;
        self.body = Some(Bytes::from(encoded));
        Ok(self.header("Content-Type", FORM_CONTENT_TYPE))
    }

    /// Attach per-call deadline and cancellation options.
    pub fn options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }
}
