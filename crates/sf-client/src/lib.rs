//! # sfquerier-client
//!
//! HTTP transport for the Salesforce REST API.
//!
//! This crate is the bottom layer of the workspace. It knows how to talk to
//! an org over HTTPS and how to read the errors Salesforce sends back, and
//! nothing about sObjects beyond URL construction:
//! - One request per call (no hidden retries)
//! - Bearer authentication and REST URL building
//! - Error responses classified into not-found, malformed-request and the rest
//! - Error-message sanitizing so tokens never reach logs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │             sfquerier (entity wrappers, purge)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │            sfquerier-rest (SalesforceRestClient)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Instance URL + access token + API version                │
//! │  - Typed JSON verbs (get_json, post_json, patch, delete)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - reqwest with timeouts, pooling, compression              │
//! │  - Error classification of non-2xx responses                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfquerier_client::SalesforceClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfquerier_client::Error> {
//!     let client = SalesforceClient::new("https://myorg.my.salesforce.com", "00D...")?;
//!
//!     let account: serde_json::Value = client
//!         .rest_get("sobjects/Account/001000000000001AAA")
//!         .await?;
//!
//!     let status = client
//!         .rest_patch("sobjects/Account/001000000000001AAA", &serde_json::json!({"Website": "acme.com"}))
//!         .await?;
//!     assert_eq!(status, 204);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, Timeouts};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{Response, ResponseExt};
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "62.0";

/// HTTP status Salesforce answers successful PATCH and DELETE calls with.
pub const NO_CONTENT: u16 = 204;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfquerier/", env!("CARGO_PKG_VERSION"));
