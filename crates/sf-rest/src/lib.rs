//! # sfquerier-rest
//!
//! Salesforce REST API client: the remote operations the entity layer needs.
//!
//! ## Features
//!
//! - **sObject CRUD** - get, create, update and delete single records
//! - **SOQL Query** - first page, `nextRecordsUrl` paging, automatic pagination, counts
//! - **SOSL Search** - full-text search across objects
//! - **Raw REST** - any method against any path under the versioned REST root
//!
//! Update and delete hand back the HTTP status rather than a boolean;
//! Salesforce answers a successful write with 204 No Content.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfquerier_rest::SalesforceRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfquerier_rest::Error> {
//!     let client = SalesforceRestClient::new(
//!         "https://myorg.my.salesforce.com",
//!         "access_token_here",
//!     )?;
//!
//!     let accounts: Vec<serde_json::Value> = client
//!         .query_all("SELECT Id, Name FROM Account")
//!         .await?;
//!
//!     let created = client
//!         .create("Account", &serde_json::json!({"Name": "New Account"}))
//!         .await?;
//!
//!     let id = created["id"].as_str().unwrap_or_default();
//!     client
//!         .update("Account", id, &serde_json::json!({"Name": "Updated"}))
//!         .await?;
//!     client.delete("Account", id).await?;
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
pub use query::{QueryResult, SearchResult};
pub use sobject::SalesforceError;

pub use sfquerier_client::{ClientConfig, RequestMethod, NO_CONTENT};
