//! OAuth 2.0 client-credentials flow.
//!
//! The token endpoint answers both success and failure with a JSON body, so
//! the response is decoded before its status is judged: a body without a
//! `token_type` is a refusal carrying the server's `error` code.

use serde::{Deserialize, Serialize};
use sforce_client::{
    sanitize_error_message, CallOptions, ErrorKind as ClientErrorKind, OrgEndpoint, SfHttpClient,
};
use tracing::{debug, instrument, warn};

use crate::credentials::{AccessCredential, ClientCredentials};
use crate::error::{Error, ErrorKind, Result};

/// OAuth client bound to one org's token endpoint.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: SfHttpClient,
    endpoint: OrgEndpoint,
}

impl OAuthClient {
    /// Create an OAuth client with default HTTP configuration.
    pub fn new(endpoint: OrgEndpoint) -> Result<Self> {
        Ok(Self::with_http(SfHttpClient::default_client()?, endpoint))
    }

    /// Create an OAuth client reusing an existing HTTP client.
    pub fn with_http(http: SfHttpClient, endpoint: OrgEndpoint) -> Self {
        Self { http, endpoint }
    }

    /// The org endpoint tokens are requested from.
    pub fn endpoint(&self) -> &OrgEndpoint {
        &self.endpoint
    }

    /// Obtain an access credential via the client-credentials grant.
    ///
    /// Returns `token_type + " " + access_token` as an [`AccessCredential`].
    /// Nothing is stored; install the credential into a REST client yourself.
    pub async fn authenticate(&self, credentials: &ClientCredentials) -> Result<AccessCredential> {
        self.authenticate_with(credentials, CallOptions::default())
            .await
    }

    /// [`authenticate`](Self::authenticate) with a per-call deadline or
    /// cancellation signal.
    pub async fn authenticate_with(
        &self,
        credentials: &ClientCredentials,
        options: CallOptions,
    ) -> Result<AccessCredential> {
        let token = self.request_token_with(credentials, options).await?;
        Ok(token.credential())
    }

    /// Request a token and return the whole decoded response.
    pub async fn request_token(&self, credentials: &ClientCredentials) -> Result<TokenResponse> {
        self.request_token_with(credentials, CallOptions::default())
            .await
    }

    /// [`request_token`](Self::request_token) with per-call options.
    ///
    /// The client secret is never logged.
    #[instrument(skip(self, credentials, options), fields(client_id = %credentials.client_id()))]
    pub async fn request_token_with(
        &self,
        credentials: &ClientCredentials,
        options: CallOptions,
    ) -> Result<TokenResponse> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id()),
            ("client_secret", credentials.client_secret()),
        ];

        let request = self
            .http
            .post(self.endpoint.token_url())
            .accept_json()
            .form(&params)?
            .options(options);

        let response = self.http.execute_raw(request).await?;
        let status = response.status();
        let success = response.is_success();
        let body = response.bytes().await?;

        let token: TokenResponse = match serde_json::from_slice(&body) {
            Ok(token) => token,
            Err(err) if success => return Err(err.into()),
            Err(_) => {
                warn!(status, "Token endpoint returned a non-JSON error body");
                return Err(Error::new(ErrorKind::Client(ClientErrorKind::Http {
                    status,
                    message: sanitize_error_message(&String::from_utf8_lossy(&body)),
                })));
            }
        };

        if token.token_type().is_empty() {
            return Err(token.into_error(status, success));
        }

        debug!(status, token_type = token.token_type(), "Token issued");
        Ok(token)
    }
}

/// Token response from the OAuth endpoint.
///
/// Every field is optional on the wire: the same shape carries both issued
/// tokens and `error` refusals. The access token and signature are redacted
/// in Debug output.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct TokenResponse {
    /// Access token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default)]
    pub token_type: Option<String>,
    /// Instance URL.
    #[serde(default)]
    pub instance_url: Option<String>,
    /// Identity URL.
    #[serde(default)]
    pub id: Option<String>,
    /// Scopes granted.
    #[serde(default)]
    pub scope: Option<String>,
    /// Issued-at timestamp (milliseconds since epoch, as a string).
    #[serde(default)]
    pub issued_at: Option<String>,
    /// Signature for verification.
    #[serde(default)]
    pub signature: Option<String>,
    /// OAuth error code on failure.
    #[serde(default)]
    pub error: Option<String>,
    /// Human-readable error on failure.
    #[serde(default)]
    pub error_description: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("scope", &self.scope)
            .field("issued_at", &self.issued_at)
            .field("signature", &self.signature.as_ref().map(|_| "[REDACTED]"))
            .field("error", &self.error)
            .field("error_description", &self.error_description)
            .finish()
    }
}

impl TokenResponse {
    /// Token type, or `""` if absent.
    pub fn token_type(&self) -> &str {
        self.token_type.as_deref().unwrap_or_default()
    }

    /// Access token, or `""` if absent.
    pub fn access_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or_default()
    }

    /// The credential this response grants.
    pub fn credential(&self) -> AccessCredential {
        AccessCredential::new(self.token_type(), self.access_token())
    }

    fn into_error(self, status: u16, success: bool) -> Error {
        match self.error.filter(|e| !e.is_empty()) {
            Some(error) => Error::new(ErrorKind::OAuth {
                error,
                description: self.error_description,
            }),
            None if !success => Error::new(ErrorKind::Client(ClientErrorKind::Http {
                status,
                message: "token endpoint returned no token".to_string(),
            })),
            None => Error::new(ErrorKind::OAuth {
                error: "missing token_type".to_string(),
                description: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn oauth_client(server: &MockServer) -> OAuthClient {
        OAuthClient::new(OrgEndpoint::from_base_url(server.uri()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_returns_type_and_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=my_key"))
            .and(body_string_contains("client_secret=my_secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "00Dxx0000001gEF!AQ4AQFakeToken",
                "signature": "sig",
                "scope": "api",
                "instance_url": "https://acme.my.salesforce.com",
                "id": "https://login.salesforce.com/id/00Dxx0000001gEF/005xx000001SwiU",
                "token_type": "Bearer",
                "issued_at": "1717000000000"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = oauth_client(&server).await;
        let credential = client
            .authenticate(&ClientCredentials::new("my_key", "my_secret"))
            .await
            .unwrap();

        assert_eq!(
            credential.header_value(),
            "Bearer 00Dxx0000001gEF!AQ4AQFakeToken"
        );
    }

    #[tokio::test]
    async fn test_request_token_keeps_all_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok",
                "token_type": "Bearer",
                "instance_url": "https://acme.my.salesforce.com",
                "scope": "api cdp_query_api",
                "issued_at": "1717000000000"
            })))
            .mount(&server)
            .await;

        let token = oauth_client(&server)
            .await
            .request_token(&ClientCredentials::new("k", "s"))
            .await
            .unwrap();

        assert_eq!(token.instance_url.as_deref(), Some("https://acme.my.salesforce.com"));
        assert_eq!(token.scope.as_deref(), Some("api cdp_query_api"));
        assert!(token.error.is_none());
    }

    #[tokio::test]
    async fn test_invalid_client_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"error": "invalid_client"})),
            )
            .mount(&server)
            .await;

        let err = oauth_client(&server)
            .await
            .authenticate(&ClientCredentials::new("bad", "creds"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid_client");
        assert_eq!(err.oauth_error(), Some("invalid_client"));
    }

    #[tokio::test]
    async fn test_missing_token_type_on_success_is_refusal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": "x"})),
            )
            .mount(&server)
            .await;

        let err = oauth_client(&server)
            .await
            .authenticate(&ClientCredentials::new("k", "s"))
            .await
            .unwrap_err();

        assert_eq!(err.oauth_error(), Some("missing token_type"));
    }

    #[tokio::test]
    async fn test_non_json_error_body_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let err = oauth_client(&server)
            .await
            .authenticate(&ClientCredentials::new("k", "s"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.kind,
            ErrorKind::Client(ClientErrorKind::Http { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"token_type\":"))
            .mount(&server)
            .await;

        let err = oauth_client(&server)
            .await
            .authenticate(&ClientCredentials::new("k", "s"))
            .await
            .unwrap_err();

        assert!(err.is_decode(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = OAuthClient::new(OrgEndpoint::from_base_url("http://127.0.0.1:1").unwrap())
            .unwrap();

        let err = client
            .authenticate(&ClientCredentials::new("k", "s"))
            .await
            .unwrap_err();

        assert!(err.is_transport(), "unexpected error: {err:?}");
    }

    #[test]
    fn test_token_response_debug_redacts_tokens() {
        let token = TokenResponse {
            access_token: Some("super_secret_access_token".to_string()),
            token_type: Some("Bearer".to_string()),
            signature: Some("signature_value".to_string()),
            ..Default::default()
        };

        let debug_output = format!("{:?}", token);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access_token"));
        assert!(!debug_output.contains("signature_value"));
    }
}
