//! The remote handle the entity wrappers talk through.

use std::future::Future;

use serde_json::Value;
use sfquerier_rest::{QueryResult, RequestMethod, SalesforceRestClient, SearchResult};

/// Raw Salesforce operations, one round-trip each.
///
/// [`SalesforceRestClient`] is the production implementation. Every method
/// returns the unprocessed body (or the HTTP status for writes); shaping the
/// answer into records and outcomes happens in the wrappers.
pub trait SalesforceApi: Send + Sync {
    /// First page of a SOQL query, as the envelope Salesforce sent.
    fn query(&self, soql: &str) -> impl Future<Output = sfquerier_rest::Result<Value>> + Send;

    /// The page behind a `nextRecordsUrl`.
    fn query_more(
        &self,
        next_records_url: &str,
    ) -> impl Future<Output = sfquerier_rest::Result<Value>> + Send;

    /// A SOSL search, as `{"searchRecords": [...]}`.
    fn search(&self, sosl: &str) -> impl Future<Output = sfquerier_rest::Result<Value>> + Send;

    fn get(
        &self,
        sobject: &str,
        id: &str,
    ) -> impl Future<Output = sfquerier_rest::Result<Value>> + Send;

    fn create(
        &self,
        sobject: &str,
        fields: &Value,
    ) -> impl Future<Output = sfquerier_rest::Result<Value>> + Send;

    /// Returns the HTTP status; 204 means applied.
    fn update(
        &self,
        sobject: &str,
        id: &str,
        fields: &Value,
    ) -> impl Future<Output = sfquerier_rest::Result<u16>> + Send;

    /// Returns the HTTP status; 204 means deleted.
    fn delete(
        &self,
        sobject: &str,
        id: &str,
    ) -> impl Future<Output = sfquerier_rest::Result<u16>> + Send;

    /// Any method against a path under the versioned REST root.
    fn restful(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> impl Future<Output = sfquerier_rest::Result<Value>> + Send;
}

impl SalesforceApi for SalesforceRestClient {
    async fn query(&self, soql: &str) -> sfquerier_rest::Result<Value> {
        let page: QueryResult<Value> = SalesforceRestClient::query(self, soql).await?;
        Ok(serde_json::to_value(page)?)
    }

    async fn query_more(&self, next_records_url: &str) -> sfquerier_rest::Result<Value> {
        let page: QueryResult<Value> =
            SalesforceRestClient::query_more(self, next_records_url).await?;
        Ok(serde_json::to_value(page)?)
    }

    async fn search(&self, sosl: &str) -> sfquerier_rest::Result<Value> {
        let result: SearchResult<Value> = SalesforceRestClient::search(self, sosl).await?;
        Ok(serde_json::to_value(result)?)
    }

    async fn get(&self, sobject: &str, id: &str) -> sfquerier_rest::Result<Value> {
        SalesforceRestClient::get(self, sobject, id).await
    }

    async fn create(&self, sobject: &str, fields: &Value) -> sfquerier_rest::Result<Value> {
        SalesforceRestClient::create(self, sobject, fields).await
    }

    async fn update(&self, sobject: &str, id: &str, fields: &Value) -> sfquerier_rest::Result<u16> {
        SalesforceRestClient::update(self, sobject, id, fields).await
    }

    async fn delete(&self, sobject: &str, id: &str) -> sfquerier_rest::Result<u16> {
        SalesforceRestClient::delete(self, sobject, id).await
    }

    async fn restful(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> sfquerier_rest::Result<Value> {
        SalesforceRestClient::restful(self, method, path, params, body).await
    }
}
