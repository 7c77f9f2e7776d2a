use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::Result;
use crate::query::SearchResult;

impl super::SalesforceRestClient {
    /// Execute a SOSL search.
    ///
    /// Search terms from user input must be escaped with
    /// `sfquerier_client::security::soql::escape_string`.
    #[instrument(skip(self))]
    pub async fn search<T: DeserializeOwned>(&self, sosl: &str) -> Result<SearchResult<T>> {
        self.client.search(sosl).await.map_err(Into::into)
    }
}
