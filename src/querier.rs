//! Generic access for anything the entity wrappers do not cover.

use std::sync::Arc;

use serde_json::Value;
use sfquerier_client::security::url as url_security;
use sfquerier_rest::RequestMethod;
use tracing::instrument;

use crate::api::SalesforceApi;
use crate::entity::{is_blank, RecordIds, SObject};
use crate::error::{Error, Operation, Result};
use crate::query::{self, QueryPage};
use crate::record::{normalize, Record};

/// Raw queries, searches and REST calls over a shared handle.
///
/// ```rust,ignore
/// let api = Arc::new(SalesforceRestClient::from_credentials(&creds)?);
/// let querier = Querier::new(api.clone());
///
/// let page = querier.query("SELECT Id, Name FROM Account LIMIT 10").await?;
/// let limits = querier.get("limits", &[]).await?;
/// ```
pub struct Querier<C> {
    api: Arc<C>,
}

impl<C> Clone for Querier<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<C> std::fmt::Debug for Querier<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Querier").finish_non_exhaustive()
    }
}

impl<C: SalesforceApi> Querier<C> {
    /// A facade over a shared API handle.
    pub fn new(api: Arc<C>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Arc<C> {
        &self.api
    }

    /// First page of a SOQL query.
    #[instrument(skip(self))]
    pub async fn query(&self, soql: &str) -> Result<QueryPage> {
        query::page(self.api.as_ref(), "query", soql).await
    }

    /// The page behind a `next_records_url` from an earlier page.
    #[instrument(skip(self))]
    pub async fn query_more(&self, next_records_url: &str) -> Result<QueryPage> {
        query::next_page(self.api.as_ref(), "query", next_records_url).await
    }

    /// Every record of a SOQL query, across all pages.
    #[instrument(skip(self))]
    pub async fn query_all(&self, soql: &str) -> Result<Vec<Record>> {
        query::all_records(self.api.as_ref(), "query", soql).await
    }

    /// Records matched by a SOSL search.
    #[instrument(skip(self))]
    pub async fn search(&self, sosl: &str) -> Result<Vec<Record>> {
        let body = self
            .api
            .search(sosl)
            .await
            .map_err(|e| Error::remote(Operation::Search, "search", e))?;
        match body.get("searchRecords") {
            Some(records) => Ok(normalize(records)?.into_records()),
            None => Err(Error::unexpected_shape("search result without `searchRecords`")),
        }
    }

    /// `GET` a path under the versioned REST root.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.call(Operation::Get, RequestMethod::Get, path, params, None).await
    }

    /// `POST` a JSON body to a path under the REST root.
    pub async fn post(&self, path: &str, params: &[(&str, &str)], body: &Value) -> Result<Value> {
        self.call(Operation::Post, RequestMethod::Post, path, params, Some(body))
            .await
    }

    /// `PATCH` a path with a JSON body.
    pub async fn patch(&self, path: &str, params: &[(&str, &str)], body: &Value) -> Result<Value> {
        self.call(Operation::Patch, RequestMethod::Patch, path, params, Some(body))
            .await
    }

    /// `DELETE` a path; Salesforce usually answers with no body, giving `Null`.
    pub async fn delete(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        self.call(Operation::Delete, RequestMethod::Delete, path, params, None)
            .await
    }

    /// Records of any sObject type by id.
    pub async fn get_sobject(&self, sobject: &str, ids: impl Into<RecordIds>) -> Result<Vec<Record>> {
        SObject::new(sobject, Arc::clone(&self.api)).get_by_id(ids).await
    }

    /// The sObject type of a record, read from its UI layout info.
    ///
    /// Entries of `layouts` are ordered by their JSON value (then key) and
    /// the first key wins.
    #[instrument(skip(self))]
    pub async fn get_sobject_type(&self, id: &str) -> Result<String> {
        if is_blank(id) {
            return Err(Error::missing_id("Record"));
        }
        let path = format!("ui-api/record-ui/{}", url_security::encode_param(id));
        let body = self.get(&path, &[]).await?;

        let layouts = body
            .get("layouts")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::unexpected_shape("record-ui response without `layouts`"))?;

        layouts
            .iter()
            .map(|(key, value)| (value.to_string(), key))
            .min()
            .map(|(_, key)| key.clone())
            .ok_or_else(|| Error::unexpected_shape("record-ui response with empty `layouts`"))
    }

    async fn call(
        &self,
        op: Operation,
        method: RequestMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.api
            .restful(method, path, &params, body)
            .await
            .map_err(|e| Error::remote(op, path, e))
    }
}
