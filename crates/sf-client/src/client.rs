//! Core HTTP client with Salesforce-specific error handling.

use tracing::{debug, info, instrument};

use crate::call::CancelSignal;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::{Response, ResponseExt};

/// HTTP client for Salesforce APIs.
///
/// One request per call, no retries. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Execute a request; non-2xx responses become errors.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.execute_raw(request).await?;
        response.check_salesforce_error().await
    }

    /// Execute a request and return the response whatever its status.
    ///
    /// Only transport failures are errors here. Used where the caller decodes
    /// error bodies itself (the OAuth token endpoint).
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute_raw(&self, request: RequestBuilder) -> Result<Response> {
        let cancel = request.options.cancel.clone();
        if cancel.as_ref().is_some_and(CancelSignal::is_cancelled) {
            return Err(Error::new(ErrorKind::Cancelled));
        }

        let send = self.send_once(&request);
        let response = match &cancel {
            Some(signal) => tokio::select! {
                biased;
                _ = signal.cancelled() => {
                    debug!("Request cancelled before response");
                    return Err(Error::new(ErrorKind::Cancelled));
                }
                response = send => response?,
            },
            None => send.await?,
        };

        Ok(Response::new(
            response,
            self.config.max_response_bytes,
            cancel,
        ))
    }

    async fn send_once(&self, request: &RequestBuilder) -> Result<reqwest::Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(deadline) = request.options.deadline {
            req = req.timeout(deadline);
        }

        if let Some(ref body) = request.body {
            req = req.body(body.clone());
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{CallOptions, CancelSignal};
    use std::time::Duration;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_request_sends_headers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let response = client
            .execute(
                client
                    .get(format!("{}/test", mock_server.uri()))
                    .authorization("Bearer test-token")
                    .accept_json(),
            )
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.bytes().await.unwrap().as_ref(), b"{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_form_body_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/form"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("a=1&b=two+words"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let request = client
            .post(format!("{}/form", mock_server.uri()))
            .form(&[("a", "1"), ("b", "two words")])
            .unwrap();

        let response = client.execute(request).await.unwrap();
        assert_eq!(response.status(), 204);
    }

    #[tokio::test]
    async fn test_salesforce_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!([{
                "errorCode": "INVALID_FIELD",
                "message": "No such column 'foo' on entity 'Account'",
                "fields": ["foo"]
            }])))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let err = client
            .execute(client.get(format!("{}/error", mock_server.uri())))
            .await
            .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::SalesforceApi { .. }));
    }

    #[tokio::test]
    async fn test_execute_raw_keeps_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("{\"error\":\"invalid_client\"}"))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let response = client
            .execute_raw(client.post(format!("{}/token", mock_server.uri())))
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(response.text().await.unwrap(), "{\"error\":\"invalid_client\"}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = SfHttpClient::default_client().unwrap();
        let err = client
            .execute(client.get("http://127.0.0.1:1/unreachable"))
            .await
            .unwrap_err();

        assert!(err.is_transport(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_deadline_elapses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let request = client
            .get(format!("{}/slow", mock_server.uri()))
            .options(CallOptions::new().with_deadline(Duration::from_millis(100)));

        let err = client.execute(request).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Timeout), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_cancel_in_flight() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let (canceller, signal) = CancelSignal::pair();
        let request = client
            .get(format!("{}/slow", mock_server.uri()))
            .options(CallOptions::new().with_cancel(signal));

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let err = client.execute(request).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Cancelled), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_already_cancelled_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::default_client().unwrap();
        let (canceller, signal) = CancelSignal::pair();
        canceller.cancel();

        let err = client
            .execute(
                client
                    .get(format!("{}/any", mock_server.uri()))
                    .options(CallOptions::new().with_cancel(signal)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Cancelled));
    }

    #[tokio::test]
    async fn test_response_size_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/big"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(2048)))
            .mount(&mock_server)
            .await;

        let client = SfHttpClient::new(
            ClientConfig::builder().with_max_response_bytes(1024).build(),
        )
        .unwrap();
        let response = client
            .execute(client.get(format!("{}/big", mock_server.uri())))
            .await
            .unwrap();

        let err = response.bytes().await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ResponseTooLarge { limit: 1024 }));
    }
}
