use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Result;
use crate::query::QueryResult;

impl super::SalesforceRestClient {
    /// Execute a SOQL query.
    ///
    /// Returns the first page of results. Use `query_all` for automatic pagination.
    ///
    /// # Security
    ///
    /// Values spliced into the WHERE clause must go through
    /// `sfquerier_client::security::soql::escape_string`:
    ///
    /// ```rust,ignore
    /// use sfquerier_client::security::soql;
    ///
    /// let query = format!(
    ///     "SELECT Id FROM Account WHERE Name = '{}'",
    ///     soql::escape_string(user_input)
    /// );
    /// ```
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.client.query(soql).await.map_err(Into::into)
    }

    /// Fetch the page behind a `nextRecordsUrl`.
    ///
    /// Accepts the full path (`/services/data/v62.0/query/01gD...-2000`) or
    /// just the locator (`01gD...-2000`).
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        let url = if next_records_url.starts_with('/') || next_records_url.contains("://") {
            next_records_url.to_string()
        } else {
            self.client
                .rest_url(&format!("query/{}", next_records_url))
        };
        self.client.query_more(&url).await.map_err(Into::into)
    }

    /// Execute a SOQL query and return all results (automatic pagination).
    #[instrument(skip(self))]
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        self.client.query_all(soql).await.map_err(Into::into)
    }

    /// `SELECT COUNT() FROM {sobject}`: the count travels in `totalSize`.
    #[instrument(skip(self))]
    pub async fn count(&self, sobject: &str) -> Result<u64> {
        self.sobject_collection_path(sobject)?;
        let page: QueryResult<serde_json::Value> = self
            .query(&format!("SELECT COUNT() FROM {}", sobject))
            .await?;
        Ok(page.total_size)
    }
}
