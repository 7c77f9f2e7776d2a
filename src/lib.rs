//! # sfquerier
//!
//! Per-object helpers over the Salesforce REST API.
//!
//! Each supported sObject gets a wrapper that turns method calls into SOQL
//! queries or sObject REST calls and hands back normalized [`Record`]s:
//!
//! - **Entities** - [`Account`], [`Contact`], [`Case`], [`CaseComment`],
//!   [`Contract`] and [`Opportunity`], each with get/create/update/delete/count
//!   plus its own lookups
//! - **Purge** - cascading delete of an account or contact together with the
//!   records that depend on it
//! - **Querier** - raw SOQL, SOSL and REST calls for everything else
//!
//! Every operation returns [`Result`]; failures keep the code and message
//! Salesforce sent (see [`ErrorKind`]).
//!
//! ## Crates
//!
//! - **sfquerier-client** - HTTP transport, error classification, SOQL escaping
//! - **sfquerier-auth** - credentials and username/password login
//! - **sfquerier-rest** - sObject CRUD, query and search over REST
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use sfquerier::auth::SalesforceCredentials;
//! use sfquerier::rest::SalesforceRestClient;
//! use sfquerier::{Account, Case};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = SalesforceCredentials::from_env()?;
//!     let api = Arc::new(SalesforceRestClient::from_credentials(&creds)?);
//!
//!     let accounts = Account::new(api.clone());
//!     for account in accounts.get_by_domain("acme.com").await? {
//!         println!("{:?}", account.str("Name"));
//!     }
//!
//!     let case = Case::new(api.clone()).get_by_number("00001026").await?;
//!     println!("{:?}", case.str("Status"));
//!
//!     let report = accounts.purge("001000000000001AAA").await?;
//!     println!("{} children deleted", report.deleted().count());
//!
//!     Ok(())
//! }
//! ```

mod api;
pub mod cascade;
pub mod entity;
mod error;
mod querier;
mod query;
pub mod record;

pub use api::SalesforceApi;
pub use cascade::{ChildDeletion, Dependent, PurgeReport};
pub use entity::{Account, Case, CaseComment, Contact, Contract, Opportunity, RecordIds, SObject};
pub use error::{Error, ErrorKind, Result};
pub use querier::Querier;
pub use query::QueryPage;
pub use record::{normalize, FieldValue, Normalized, Record};

pub use sfquerier_auth as auth;
pub use sfquerier_client as client;
pub use sfquerier_rest as rest;
