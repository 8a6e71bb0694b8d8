//! # sforce-auth
//!
//! Salesforce authentication via the OAuth 2.0 client-credentials flow.
//!
//! ## Security
//!
//! - Client secrets and access tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages never include credential values
//!
//! ## Example
//!
//! ```rust,ignore
//! use sforce_auth::{ClientCredentials, OAuthClient};
//! use sforce_client::OrgEndpoint;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let oauth = OAuthClient::new(OrgEndpoint::from_env()?)?;
//!     let credential = oauth.authenticate(&ClientCredentials::from_env()?).await?;
//!
//!     // "Bearer 00D..."
//!     let header = credential.header_value();
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod oauth;

pub use credentials::{AccessCredential, ClientCredentials};
pub use error::{Error, ErrorKind, Result};
pub use oauth::{OAuthClient, TokenResponse};
