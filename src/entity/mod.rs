//! Per-sObject wrappers.
//!
//! [`SObject`] implements the operations every sObject shares; each entity
//! wrapper holds one and adds the lookups specific to its type.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use sfquerier_client::NO_CONTENT;
use sfquerier_rest::SalesforceError;
use tracing::{info, instrument, warn};

use crate::api::SalesforceApi;
use crate::error::{Error, ErrorKind, Operation, Result};
use crate::query;
use crate::record::Record;

mod account;
mod case;
mod case_comment;
mod contact;
mod contract;
mod opportunity;

pub use account::Account;
pub use case::Case;
pub use case_comment::CaseComment;
pub use contact::Contact;
pub use contract::Contract;
pub use opportunity::Opportunity;

/// One id or several, for [`SObject::get_by_id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordIds(Vec<String>);

impl RecordIds {
    /// True when any id is blank. An empty list is not missing; it looks up
    /// nothing.
    pub fn is_missing(&self) -> bool {
        self.0.iter().any(|id| is_blank(id))
    }

    /// Number of ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The ids in the order given.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for RecordIds {
    fn from(id: &str) -> Self {
        Self(vec![id.to_string()])
    }
}

impl From<String> for RecordIds {
    fn from(id: String) -> Self {
        Self(vec![id])
    }
}

impl From<&String> for RecordIds {
    fn from(id: &String) -> Self {
        Self(vec![id.clone()])
    }
}

impl From<Vec<String>> for RecordIds {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl From<Vec<&str>> for RecordIds {
    fn from(ids: Vec<&str>) -> Self {
        Self(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for RecordIds {
    fn from(ids: &[&str]) -> Self {
        Self(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RecordIds {
    fn from(ids: [&str; N]) -> Self {
        Self(ids.iter().map(|id| id.to_string()).collect())
    }
}

pub(crate) fn is_blank(id: &str) -> bool {
    id.trim().is_empty()
}

/// Operations shared by every sObject type.
///
/// Entity wrappers use one of these internally; it can also be built
/// directly for types without a dedicated wrapper:
///
/// ```rust,ignore
/// let tasks = SObject::new("Task", api.clone());
/// let count = tasks.get_count().await?;
/// ```
pub struct SObject<C> {
    name: String,
    api: Arc<C>,
}

impl<C> Clone for SObject<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            api: Arc::clone(&self.api),
        }
    }
}

impl<C> std::fmt::Debug for SObject<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SObject").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<C: SalesforceApi> SObject<C> {
    /// An engine for the sObject `name` over a shared API handle.
    pub fn new(name: impl Into<String>, api: Arc<C>) -> Self {
        Self {
            name: name.into(),
            api,
        }
    }

    /// The sObject API name (`Account`, `CaseComment`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The API handle calls go through.
    pub fn api(&self) -> &Arc<C> {
        &self.api
    }

    /// Fetch records by id, one round-trip per id, in the order given.
    ///
    /// Any failing id fails the whole call. An empty list returns no records
    /// without a call.
    #[instrument(skip(self, ids), fields(sobject = %self.name))]
    pub async fn get_by_id(&self, ids: impl Into<RecordIds>) -> Result<Vec<Record>> {
        let ids = ids.into();
        if ids.is_missing() {
            return Err(Error::missing_id(&self.name));
        }

        let mut records = Vec::with_capacity(ids.len());
        for id in ids.iter() {
            let body = self
                .api
                .get(&self.name, id)
                .await
                .map_err(|e| Error::remote(Operation::Get, &self.name, e))?;
            records.push(Record::from_value(&body)?);
        }
        Ok(records)
    }

    /// Create a record and return its id.
    ///
    /// Only the `success` flag and `id` decide the outcome; `errors` is read
    /// on rejection and keeps the entries that parse.
    #[instrument(skip(self, fields), fields(sobject = %self.name))]
    pub async fn create(&self, fields: &Value) -> Result<String> {
        let body = self
            .api
            .create(&self.name, fields)
            .await
            .map_err(|e| Error::remote(Operation::Create, &self.name, e))?;

        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        match body.get("id").and_then(Value::as_str) {
            Some(id) if success && !is_blank(id) => {
                info!(sobject = %self.name, id, "Created {}", self.name);
                Ok(id.to_string())
            }
            _ => {
                let errors = rejection_errors(&body);
                warn!(sobject = %self.name, errors = ?errors, "{} creation failed", self.name);
                Err(Error::new(ErrorKind::Rejected {
                    sobject: self.name.clone(),
                    errors,
                }))
            }
        }
    }

    /// Update fields on a record. Only a 204 answer counts as applied.
    #[instrument(skip(self, fields), fields(sobject = %self.name))]
    pub async fn update(&self, id: &str, fields: &Value) -> Result<()> {
        if is_blank(id) {
            return Err(Error::missing_id(&self.name));
        }
        let status = self
            .api
            .update(&self.name, id, fields)
            .await
            .map_err(|e| Error::remote(Operation::Update, &self.name, e))?;
        self.expect_no_content(Operation::Update, id, status)
    }

    /// Delete a record. Only a 204 answer counts as deleted.
    #[instrument(skip(self), fields(sobject = %self.name))]
    pub async fn delete(&self, id: &str) -> Result<()> {
        if is_blank(id) {
            return Err(Error::missing_id(&self.name));
        }
        let status = self
            .api
            .delete(&self.name, id)
            .await
            .map_err(|e| Error::remote(Operation::Delete, &self.name, e))?;
        self.expect_no_content(Operation::Delete, id, status)
    }

    /// Number of records of this type.
    #[instrument(skip(self), fields(sobject = %self.name))]
    pub async fn get_count(&self) -> Result<u64> {
        let soql = format!("SELECT COUNT() FROM {}", self.name);
        Ok(query::page(self.api.as_ref(), &self.name, &soql).await?.total_size)
    }

    /// First page of a query against this type.
    pub(crate) async fn query(&self, soql: &str) -> Result<Vec<Record>> {
        query::records(self.api.as_ref(), &self.name, soql).await
    }

    /// Every page of a query against this type.
    pub(crate) async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        query::all_records(self.api.as_ref(), &self.name, soql).await
    }

    fn expect_no_content(&self, op: Operation, id: &str, status: u16) -> Result<()> {
        if status == NO_CONTENT {
            match op {
                Operation::Delete => info!(sobject = %self.name, id, "Deleted {} ID: {}", self.name, id),
                _ => info!(sobject = %self.name, id, "Updated {} ID: {}", self.name, id),
            }
            return Ok(());
        }
        warn!(op = %op, sobject = %self.name, id, status, "Expected 204 No Content");
        Err(Error::new(ErrorKind::UnexpectedStatus { status }))
    }
}

/// Declares an entity wrapper around [`SObject`] with the shared operations
/// forwarded.
macro_rules! sobject_wrapper {
    ($(#[$meta:meta])* $wrapper:ident, $sobject:literal) => {
        $(#[$meta])*
        pub struct $wrapper<C> {
            sobject: $crate::entity::SObject<C>,
        }

        impl<C> Clone for $wrapper<C> {
            fn clone(&self) -> Self {
                Self {
                    sobject: self.sobject.clone(),
                }
            }
        }

        impl<C> std::fmt::Debug for $wrapper<C> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($wrapper)).finish_non_exhaustive()
            }
        }

        impl<C: $crate::api::SalesforceApi> $wrapper<C> {
            /// The sObject API name.
            pub const SOBJECT: &'static str = $sobject;

            /// A wrapper over a shared API handle.
            pub fn new(api: std::sync::Arc<C>) -> Self {
                Self {
                    sobject: $crate::entity::SObject::new($sobject, api),
                }
            }

            /// The shared operations for this type.
            pub fn sobject(&self) -> &$crate::entity::SObject<C> {
                &self.sobject
            }

            /// See [`SObject::get_by_id`](crate::entity::SObject::get_by_id).
            pub async fn get_by_id(
                &self,
                ids: impl Into<$crate::entity::RecordIds>,
            ) -> $crate::error::Result<Vec<$crate::record::Record>> {
                self.sobject.get_by_id(ids).await
            }

            /// See [`SObject::create`](crate::entity::SObject::create).
            pub async fn create(&self, fields: &serde_json::Value) -> $crate::error::Result<String> {
                self.sobject.create(fields).await
            }

            /// See [`SObject::update`](crate::entity::SObject::update).
            pub async fn update(
                &self,
                id: &str,
                fields: &serde_json::Value,
            ) -> $crate::error::Result<()> {
                self.sobject.update(id, fields).await
            }

            /// See [`SObject::delete`](crate::entity::SObject::delete).
            pub async fn delete(&self, id: &str) -> $crate::error::Result<()> {
                self.sobject.delete(id).await
            }

            /// See [`SObject::get_count`](crate::entity::SObject::get_count).
            pub async fn get_count(&self) -> $crate::error::Result<u64> {
                self.sobject.get_count().await
            }
        }
    };
}

pub(crate) use sobject_wrapper;

/// The well-formed entries of a create body's `errors` list.
fn rejection_errors(body: &Value) -> Vec<SalesforceError> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|entry| SalesforceError::deserialize(entry).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Quote a value for a SOQL string literal.
pub(crate) fn literal(value: &str) -> String {
    format!("'{}'", sfquerier_client::security::soql::escape_string(value))
}
