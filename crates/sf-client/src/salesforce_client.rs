//! Authenticated Salesforce client with typed HTTP methods.
//!
//! `SalesforceClient` pairs an [`OrgEndpoint`] with the `Authorization`
//! credential for that org. Both are fixed at construction, so a client can be
//! shared freely across tasks; a different credential means a different client.
//!
//! ## Security
//!
//! - The credential is redacted in Debug output
//! - Request bodies and credentials are skipped in tracing spans

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::call::CallOptions;
use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::endpoint::OrgEndpoint;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, JSON_CONTENT_TYPE};
use crate::DEFAULT_API_VERSION;

/// Salesforce API client bound to one org and one credential.
///
/// # Example
///
/// ```rust,ignore
/// use sforce_client::{OrgEndpoint, SalesforceClient};
///
/// let endpoint = OrgEndpoint::new("acme")?;
/// let client = SalesforceClient::new(endpoint, "Bearer 00D...")?;
///
/// let body = client
///     .get_bytes(&client.rest_url("query/?q=SELECT+Id+FROM+Account"), CallOptions::default())
///     .await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    endpoint: OrgEndpoint,
    authorization: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("endpoint", &self.endpoint)
            .field("authorization", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a client for `endpoint` that sends `authorization` verbatim as
    /// the `Authorization` header (e.g. `"Bearer 00D..."`).
    pub fn new(endpoint: OrgEndpoint, authorization: impl Into<String>) -> Result<Self> {
        Self::with_config(endpoint, authorization, ClientConfig::default())
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(
        endpoint: OrgEndpoint,
        authorization: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Self::with_http(SfHttpClient::new(config)?, endpoint, authorization)
    }

    /// Create a client reusing an existing HTTP client (and its connection pool).
    pub fn with_http(
        http: SfHttpClient,
        endpoint: OrgEndpoint,
        authorization: impl Into<String>,
    ) -> Result<Self> {
        let authorization = authorization.into();
        if authorization.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "access credential must not be empty".to_string(),
            )));
        }

        Ok(Self {
            http,
            endpoint,
            authorization,
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g., "61.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into().trim_start_matches('v').to_string();
        self
    }

    /// Get the org endpoint.
    pub fn endpoint(&self) -> &OrgEndpoint {
        &self.endpoint
    }

    /// Get the credential sent as the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &SfHttpClient {
        &self.http
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account/")` -> `.../services/data/v61.0/sobjects/Account/`
    pub fn rest_url(&self, path: &str) -> String {
        self.endpoint.rest_url(&self.api_version, path)
    }

    /// Create a GET request builder with the credential attached.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).authorization(&self.authorization)
    }

    /// Create a POST request builder with the credential attached.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).authorization(&self.authorization)
    }

    /// Execute a request and return the checked response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<crate::Response> {
        self.http.execute(request).await
    }

    /// GET a JSON resource and return the body bytes untouched.
    #[instrument(skip(self, options), fields(url = %url))]
    pub async fn get_bytes(&self, url: &str, options: CallOptions) -> Result<Bytes> {
        let request = self
            .get(url)
            .accept_json()
            .header("Content-Type", JSON_CONTENT_TYPE)
            .options(options);
        let response = self.http.execute(request).await?;
        response.bytes().await
    }

    /// GET request with JSON response deserialization.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, options: CallOptions) -> Result<T> {
        let body = self.get_bytes(url, options).await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body, options), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        options: CallOptions,
    ) -> Result<T> {
        let request = self.post(url).accept_json().json(body)?.options(options);
        let response = self.http.execute(request).await?;
        response.json().await
    }
}
