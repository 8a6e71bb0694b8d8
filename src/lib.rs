//! # sforce
//!
//! A minimal Salesforce REST API client for Rust.
//!
//! Obtains an OAuth 2.0 access token with the client-credentials grant, runs
//! SOQL queries (returning the raw response body) and creates records.
//!
//! ## Security
//!
//! - Access tokens and client secrets are redacted in Debug output
//! - Tracing spans skip credential parameters and request bodies
//! - Error messages built from server bodies are sanitized
//!
//! ## Crates
//!
//! - **sforce-client** - HTTP plumbing: config, endpoints, errors, cancellation
//! - **sforce-auth** - OAuth 2.0 client-credentials flow
//! - **sforce-rest** - REST API: SOQL query and sObject create
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sforce::auth::{ClientCredentials, OAuthClient};
//! use sforce::client::OrgEndpoint;
//! use sforce::rest::SalesforceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = OrgEndpoint::new("acme")?;
//!     let credential = OAuthClient::new(endpoint.clone())?
//!         .authenticate(&ClientCredentials::new("client-id", "client-secret"))
//!         .await?;
//!
//!     let client = SalesforceRestClient::new(endpoint, &credential)?;
//!     let body = client.query_raw("SELECT Id, Name FROM Account LIMIT 10").await?;
//!     println!("{}", String::from_utf8_lossy(&body));
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
pub use sforce_auth as auth;
pub use sforce_client as client;
pub use sforce_rest as rest;
