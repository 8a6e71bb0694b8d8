//! # sforce-rest
//!
//! Salesforce REST API operations: SOQL query and sObject create.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sforce_auth::{ClientCredentials, OAuthClient};
//! use sforce_client::OrgEndpoint;
//! use sforce_rest::SalesforceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = OrgEndpoint::new("acme")?;
//!     let credential = OAuthClient::new(endpoint.clone())?
//!         .authenticate(&ClientCredentials::from_env()?)
//!         .await?;
//!
//!     let client = SalesforceRestClient::new(endpoint, &credential)?;
//!
//!     let body = client.query_raw("SELECT Id, Name FROM Account LIMIT 10").await?;
//!     println!("{}", String::from_utf8_lossy(&body));
//!
//!     let id = client
//!         .create("Account", &serde_json::json!({"Name": "New Account"}))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod sobject;

pub use client::SalesforceRestClient;
pub use error::{Error, ErrorKind, Result};
pub use query::QueryResult;
pub use sobject::{CreateResult, SalesforceError};

// Re-export sforce-client types that users might need
pub use sforce_client::{CallOptions, CancelSignal, Canceller, ClientConfig, OrgEndpoint};
