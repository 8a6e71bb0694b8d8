//! # sforce-client
//!
//! Core HTTP plumbing for the Salesforce REST API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │              (sforce-auth, sforce-rest)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds org endpoint + credential + HTTP client            │
//! │  - Typed JSON / raw byte methods                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - One request per call, deadline + cancellation            │
//! │  - Salesforce error mapping, bounded body reads             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod call;
mod client;
mod config;
mod endpoint;
mod error;
mod request;
mod response;
mod salesforce_client;
pub mod security;

pub use call::{CallOptions, CancelSignal, Canceller};
pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_MAX_RESPONSE_BYTES};
pub use endpoint::OrgEndpoint;
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
pub use response::{sanitize_error_message, Response, ResponseExt};
pub use salesforce_client::SalesforceClient;

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "61.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sforce/", env!("CARGO_PKG_VERSION"));
