//! Salesforce REST API client.
//!
//! Wraps `SalesforceClient` from `sforce-client` and provides the query and
//! create operations.

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use sforce_auth::AccessCredential;
use sforce_client::security::soql;
use sforce_client::{CallOptions, ClientConfig, OrgEndpoint, SalesforceClient};

use crate::error::{Error, ErrorKind, Result};
use crate::query::QueryResult;
use crate::sobject::CreateResult;

/// Salesforce REST API client.
///
/// Holds its own org endpoint and credential; clone it to share across tasks
/// and build a second client for a second credential.
///
/// # Example
///
/// ```rust,ignore
/// use sforce_rest::SalesforceRestClient;
///
/// let client = SalesforceRestClient::new(OrgEndpoint::new("acme")?, &credential)?;
///
/// // Raw query body, exactly as Salesforce sent it
/// let body = client.query_raw("SELECT Id, Name FROM Account").await?;
///
/// // Create
/// let id = client.create("Account", &json!({"Name": "Acme"})).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a REST client for `endpoint` authenticated with `credential`.
    pub fn new(endpoint: OrgEndpoint, credential: &AccessCredential) -> Result<Self> {
        Self::with_authorization(endpoint, credential.header_value())
    }

    /// Create a REST client from a full `Authorization` header value,
    /// e.g. `"Bearer 00D..."`.
    pub fn with_authorization(
        endpoint: OrgEndpoint,
        authorization: impl Into<String>,
    ) -> Result<Self> {
        let client = SalesforceClient::new(endpoint, authorization)?;
        Ok(Self { client })
    }

    /// Create a REST client with custom HTTP configuration.
    pub fn with_config(
        endpoint: OrgEndpoint,
        credential: &AccessCredential,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(endpoint, credential.header_value(), config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    /// Get the org endpoint.
    pub fn endpoint(&self) -> &OrgEndpoint {
        self.client.endpoint()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    /// URL for a SOQL query: `.../query/?q={urlencoded soql}`.
    pub fn query_url(&self, soql: &str) -> String {
        self.client
            .rest_url(&format!("query/?q={}", urlencoding::encode(soql)))
    }

    // =========================================================================
    // Query
    // =========================================================================

    /// Execute a SOQL query and return the response body verbatim.
    ///
    /// The body is Salesforce's query envelope (`totalSize`, `done`,
    /// `records`, `nextRecordsUrl`); only the first page is fetched.
    ///
    /// The SOQL text is sent as given. Escape caller-supplied literals with
    /// [`sforce_client::security::soql::escape_string`] first.
    pub async fn query_raw(&self, soql: &str) -> Result<Bytes> {
        self.query_raw_with(soql, CallOptions::default()).await
    }

    /// [`query_raw`](Self::query_raw) with a per-call deadline or
    /// cancellation signal.
    #[instrument(skip(self, options))]
    pub async fn query_raw_with(&self, soql: &str, options: CallOptions) -> Result<Bytes> {
        let body = self.client.get_bytes(&self.query_url(soql), options).await?;
        debug!(bytes = body.len(), "Query response received");
        Ok(body)
    }

    /// Execute a SOQL query and decode the first page of records.
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.query_with(soql, CallOptions::default()).await
    }

    /// [`query`](Self::query) with per-call options.
    #[instrument(skip(self, options))]
    pub async fn query_with<T: DeserializeOwned>(
        &self,
        soql: &str,
        options: CallOptions,
    ) -> Result<QueryResult<T>> {
        self.client
            .get_json(&self.query_url(soql), options)
            .await
            .map_err(Into::into)
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Create a record and return its ID.
    ///
    /// `record` is serialized as the JSON body, typically a map of field
    /// API names to values.
    pub async fn create<T: Serialize + ?Sized>(&self, sobject: &str, record: &T) -> Result<String> {
        self.create_with(sobject, record, CallOptions::default())
            .await
    }

    /// [`create`](Self::create) with per-call options.
    #[instrument(skip(self, record, options))]
    pub async fn create_with<T: Serialize + ?Sized>(
        &self,
        sobject: &str,
        record: &T,
        options: CallOptions,
    ) -> Result<String> {
        if !soql::is_safe_sobject_name(sobject) {
            return Err(Error::new(ErrorKind::InvalidInput(format!(
                "invalid sObject name: {sobject:?}"
            ))));
        }

        let url = self.client.rest_url(&format!("sobjects/{sobject}/"));
        let result: CreateResult = self.client.post_json(&url, record, options).await?;

        match result {
            CreateResult {
                success: true,
                id: Some(id),
                ..
            } if !id.is_empty() => {
                debug!(id = %id, "Record created");
                Ok(id)
            }
            CreateResult { success: true, .. } => Err(Error::new(ErrorKind::Salesforce {
                error_code: "MISSING_ID".to_string(),
                message: "create reported success without an id".to_string(),
            })),
            failed => Err(Error::new(ErrorKind::Salesforce {
                error_code: failed
                    .errors
                    .first()
                    .map(|e| e.status_code.clone())
                    .unwrap_or_else(|| "CREATE_FAILED".to_string()),
                message: failed.error_messages(),
            })),
        }
    }
}
