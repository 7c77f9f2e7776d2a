//! SOQL helpers shared by the wrappers and the facade.

use serde_json::Value;
use tracing::debug;

use crate::api::SalesforceApi;
use crate::error::{Error, Operation, Result};
use crate::record::{normalize, Record};

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    pub total_size: u64,
    pub done: bool,
    /// Pass to `query_more` to fetch the next page.
    pub next_records_url: Option<String>,
    pub records: Vec<Record>,
}

impl QueryPage {
    fn from_envelope(body: &Value) -> Result<Self> {
        let total_size = body
            .get("totalSize")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::unexpected_shape("query result without `totalSize`"))?;
        Ok(Self {
            total_size,
            done: body.get("done").and_then(Value::as_bool).unwrap_or(true),
            next_records_url: body
                .get("nextRecordsUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
            records: normalize(body)?.into_records(),
        })
    }
}

pub(crate) async fn page<C: SalesforceApi>(api: &C, resource: &str, soql: &str) -> Result<QueryPage> {
    debug!(resource, soql, "SOQL query");
    let body = api
        .query(soql)
        .await
        .map_err(|e| Error::remote(Operation::Query, resource, e))?;
    QueryPage::from_envelope(&body)
}

pub(crate) async fn next_page<C: SalesforceApi>(
    api: &C,
    resource: &str,
    next_records_url: &str,
) -> Result<QueryPage> {
    let body = api
        .query_more(next_records_url)
        .await
        .map_err(|e| Error::remote(Operation::Query, resource, e))?;
    QueryPage::from_envelope(&body)
}

/// The first page's records.
pub(crate) async fn records<C: SalesforceApi>(api: &C, resource: &str, soql: &str) -> Result<Vec<Record>> {
    Ok(page(api, resource, soql).await?.records)
}

/// Every page's records, following `nextRecordsUrl` until `done`.
pub(crate) async fn all_records<C: SalesforceApi>(
    api: &C,
    resource: &str,
    soql: &str,
) -> Result<Vec<Record>> {
    let mut current = page(api, resource, soql).await?;
    let mut records = std::mem::take(&mut current.records);

    while let Some(next) = current.next_records_url.take() {
        current = next_page(api, resource, &next).await?;
        records.append(&mut current.records);
    }
    Ok(records)
}
