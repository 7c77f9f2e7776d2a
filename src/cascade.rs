//! Cascade delete ("purge") of a parent record and its dependents.
//!
//! A purge enumerates every dependent type in registration order, attempts
//! each child delete, then deletes the parent. Individual child failures are
//! recorded and skipped. A failed enumeration query aborts before anything is
//! deleted. Nothing is rolled back: when the parent delete fails, children
//! already deleted stay deleted.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::api::SalesforceApi;
use crate::entity::{self, SObject};
use crate::error::{Error, Result};
use crate::query;
use crate::record::Record;

/// A child sObject type removed before its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    pub sobject: &'static str,
    /// Field on the child holding the parent id.
    pub foreign_key: &'static str,
    /// Human-facing field logged with each deletion (e.g. `CaseNumber`).
    pub label: Option<&'static str>,
}

impl Dependent {
    /// Children of `sobject` pointing at the parent through `foreign_key`.
    pub const fn new(sobject: &'static str, foreign_key: &'static str) -> Self {
        Self {
            sobject,
            foreign_key,
            label: None,
        }
    }

    /// Also select `field` and log it with each deletion.
    pub const fn labelled(mut self, field: &'static str) -> Self {
        self.label = Some(field);
        self
    }

    fn soql(&self, parent_id: &str) -> String {
        let fields = match self.label {
            Some(label) => format!("Id,{}", label),
            None => "Id".to_string(),
        };
        format!(
            "SELECT {} FROM {} WHERE {}={}",
            fields,
            self.sobject,
            self.foreign_key,
            entity::literal(parent_id)
        )
    }
}

/// Outcome of one child delete.
#[derive(Debug)]
pub struct ChildDeletion {
    pub sobject: String,
    pub id: String,
    pub label: Option<String>,
    pub error: Option<Error>,
}

impl ChildDeletion {
    pub fn deleted(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate outcome of a purge.
#[derive(Debug)]
pub struct PurgeReport {
    pub sobject: String,
    pub parent_id: String,
    /// True when the parent delete succeeded.
    pub success: bool,
    /// Every child delete attempted, in the order issued.
    pub children: Vec<ChildDeletion>,
    pub parent_error: Option<Error>,
}

impl PurgeReport {
    /// Child deletions of one sObject type.
    pub fn children_of<'a>(&'a self, sobject: &'a str) -> impl Iterator<Item = &'a ChildDeletion> {
        self.children.iter().filter(move |c| c.sobject == sobject)
    }

    /// Children that were deleted.
    pub fn deleted(&self) -> impl Iterator<Item = &ChildDeletion> {
        self.children.iter().filter(|c| c.deleted())
    }

    /// Children whose delete failed; they still exist.
    pub fn failed(&self) -> impl Iterator<Item = &ChildDeletion> {
        self.children.iter().filter(|c| !c.deleted())
    }

    /// `Err` with the parent's error when the parent was not deleted.
    pub fn into_result(mut self) -> Result<Self> {
        match self.parent_error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Delete `parent_id` of type `parent` after every dependent record.
#[instrument(skip(api, dependents))]
pub async fn purge<C: SalesforceApi>(
    api: &Arc<C>,
    parent: &str,
    parent_id: &str,
    dependents: &[Dependent],
) -> Result<PurgeReport> {
    let children = delete_children(api, parent, parent_id, dependents).await?;

    let parent_error = SObject::new(parent, Arc::clone(api)).delete(parent_id).await.err();
    match &parent_error {
        None => info!(sobject = parent, id = parent_id, "Purged {} ID: {}", parent, parent_id),
        Some(err) => warn!(sobject = parent, id = parent_id, error = %err, "Failed to purge {} ID: {}", parent, parent_id),
    }

    Ok(PurgeReport {
        sobject: parent.to_string(),
        parent_id: parent_id.to_string(),
        success: parent_error.is_none(),
        children,
        parent_error,
    })
}

/// Delete every dependent record of `parent_id`, leaving the parent in place.
#[instrument(skip(api, dependents))]
pub async fn delete_children<C: SalesforceApi>(
    api: &Arc<C>,
    parent: &str,
    parent_id: &str,
    dependents: &[Dependent],
) -> Result<Vec<ChildDeletion>> {
    if entity::is_blank(parent_id) {
        return Err(Error::missing_id(parent));
    }

    let mut found = Vec::with_capacity(dependents.len());
    for dependent in dependents {
        let records =
            query::all_records(api.as_ref(), dependent.sobject, &dependent.soql(parent_id)).await?;
        if records.is_empty() {
            info!(
                sobject = dependent.sobject,
                "No {} records were found for {} ID: {}", dependent.sobject, parent, parent_id
            );
        }
        found.push((dependent, records));
    }

    let mut deletions = Vec::new();
    for (dependent, records) in found {
        let sobject = SObject::new(dependent.sobject, Arc::clone(api));
        for record in records {
            deletions.push(delete_child(&sobject, dependent, &record).await);
        }
    }
    Ok(deletions)
}

async fn delete_child<C: SalesforceApi>(
    sobject: &SObject<C>,
    dependent: &Dependent,
    record: &Record,
) -> ChildDeletion {
    let label = dependent
        .label
        .and_then(|field| record.str(field))
        .map(str::to_string);
    let id = record.id().unwrap_or_default().to_string();

    let error = sobject.delete(&id).await.err();
    let shown = label.as_deref().unwrap_or(&id);
    match &error {
        None => info!(sobject = dependent.sobject, %id, "Deleted {} #{}", dependent.sobject, shown),
        Some(err) => warn!(sobject = dependent.sobject, %id, error = %err, "Failed to delete {} #{}", dependent.sobject, shown),
    }

    ChildDeletion {
        sobject: dependent.sobject.to_string(),
        id,
        label,
        error,
    }
}
