//! Authenticated Salesforce client with typed HTTP methods.
//!
//! `SalesforceClient` pairs an instance URL and access token with the HTTP
//! client and exposes the handful of verbs the REST layer needs.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Request bodies are skipped in tracing spans

use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{RequestBuilder, RequestMethod};
use crate::DEFAULT_API_VERSION;

/// Authenticated Salesforce API client.
///
/// # Example
///
/// ```rust,ignore
/// use sfquerier_client::SalesforceClient;
///
/// let client = SalesforceClient::new("https://na1.salesforce.com", "00D...")?;
///
/// let page: QueryResult<serde_json::Value> =
///     client.query("SELECT Id, Name FROM Account").await?;
///
/// let status = client.rest_delete("sobjects/Account/001000000000001AAA").await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = SfHttpClient::new(config)?;
        Ok(Self {
            http,
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the full URL for a path.
    ///
    /// Absolute URLs pass through; paths are appended to the instance URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.instance_url, path)
        } else {
            format!("{}/{}", self.instance_url, path)
        }
    }

    /// Build the REST API URL for a path.
    ///
    /// Example: `rest_url("sobjects/Account")` -> `{instance}/services/data/v62.0/sobjects/Account`
    pub fn rest_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/{}",
            self.instance_url, self.api_version, path
        )
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create an authenticated request builder for any method.
    pub fn request(&self, method: RequestMethod, url: &str) -> RequestBuilder {
        RequestBuilder::new(method, url).bearer_auth(&self.access_token)
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.access_token)
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.http.patch(url).bearer_auth(&self.access_token)
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.http.delete(url).bearer_auth(&self.access_token)
    }

    /// Execute a request and return the raw response.
    pub async fn execute(&self, request: RequestBuilder) -> Result<crate::Response> {
        self.http.execute(request).await
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// GET request with JSON response deserialization.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.get(&self.url(url));
        self.http.send_json(request).await
    }

    /// GET request to REST API with JSON response.
    pub async fn rest_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_json(&self.rest_url(path)).await
    }

    /// POST request with JSON body and response.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.post(&self.url(url)).json(body)?;
        self.http.send_json(request).await
    }

    /// POST request to REST API with JSON body and response.
    pub async fn rest_post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.post_json(&self.rest_url(path), body).await
    }

    /// PATCH request with JSON body; returns the HTTP status.
    ///
    /// Salesforce answers a successful record update with 204. Other 2xx
    /// codes are returned as-is so the caller decides what counts as done.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn patch_json<B: Serialize>(&self, url: &str, body: &B) -> Result<u16> {
        let request = self.patch(&self.url(url)).json(body)?;
        let response = self.http.execute(request).await?;
        Ok(response.status())
    }

    /// PATCH request to REST API; returns the HTTP status.
    pub async fn rest_patch<B: Serialize>(&self, path: &str, body: &B) -> Result<u16> {
        self.patch_json(&self.rest_url(path), body).await
    }

    /// DELETE request; returns the HTTP status.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn delete_request(&self, url: &str) -> Result<u16> {
        let request = self.delete(&self.url(url));
        let response = self.http.execute(request).await?;
        Ok(response.status())
    }

    /// DELETE request to REST API; returns the HTTP status.
    pub async fn rest_delete(&self, path: &str) -> Result<u16> {
        self.delete_request(&self.rest_url(path)).await
    }

    /// Any-method REST call relative to the versioned REST root.
    ///
    /// Returns the JSON body, or `Value::Null` when the body is empty.
    #[instrument(skip(self, params, body), fields(method = %method, path = %path))]
    pub async fn restful(
        &self,
        method: RequestMethod,
        path: &str,
        params: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let mut request = self
            .request(method, &self.rest_url(path))
            .query_pairs(params.iter().cloned());
        if let Some(body) = body {
            request = request.json_value(body.clone());
        }
        let response = self.http.execute(request).await?;
        response.json_or_null().await
    }

    // =========================================================================
    // Query Helpers
    // =========================================================================

    /// Execute a SOQL query via REST API (first page).
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let url = format!(
            "{}/services/data/v{}/query?q={}",
            self.instance_url,
            self.api_version,
            urlencoding::encode(soql)
        );
        self.get_json(&url).await
    }

    /// Fetch the page behind a `nextRecordsUrl`.
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.get_json(next_records_url).await
    }

    /// Execute a SOQL query and automatically fetch all pages.
    pub async fn query_all<T: DeserializeOwned>(&self, soql: &str) -> Result<Vec<T>> {
        let mut result: QueryResult<T> = self.query(soql).await?;
        let mut all_records = std::mem::take(&mut result.records);

        while let Some(next_url) = result.next_records_url.take() {
            result = self.query_more(&next_url).await?;
            all_records.append(&mut result.records);
        }

        Ok(all_records)
    }

    /// Execute a SOSL search.
    pub async fn search<T: DeserializeOwned>(&self, sosl: &str) -> Result<T> {
        let url = format!(
            "{}/services/data/v{}/search?q={}",
            self.instance_url,
            self.api_version,
            urlencoding::encode(sosl)
        );
        self.get_json(&url).await
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize")]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl", default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,

    /// The records.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_building() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "token123").unwrap();

        assert_eq!(
            client.url("/services/data/v62.0/query/01gD0000002HU6KIAW-2000"),
            "https://na1.salesforce.com/services/data/v62.0/query/01gD0000002HU6KIAW-2000"
        );
        assert_eq!(
            client.url("services/oauth2/userinfo"),
            "https://na1.salesforce.com/services/oauth2/userinfo"
        );
        assert_eq!(client.url("https://other.com/path"), "https://other.com/path");
        assert_eq!(
            client.rest_url("sobjects/Account"),
            "https://na1.salesforce.com/services/data/v62.0/sobjects/Account"
        );
        assert_eq!(
            client.rest_url("/ui-api/record-ui/001000000000001"),
            "https://na1.salesforce.com/services/data/v62.0/ui-api/record-ui/001000000000001"
        );
    }

    #[test]
    fn test_api_version_and_trailing_slash() {
        let client = SalesforceClient::new("https://na1.salesforce.com/", "token")
            .unwrap()
            .with_api_version("52.0");

        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
        assert_eq!(client.api_version(), "52.0");
        assert_eq!(
            client.rest_url("limits"),
            "https://na1.salesforce.com/services/data/v52.0/limits"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = SalesforceClient::new("https://na1.salesforce.com", "00Dsecret!token").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("00Dsecret"));
    }

    #[test]
    fn test_count_query_result_without_records() {
        let page: QueryResult<serde_json::Value> =
            serde_json::from_value(serde_json::json!({"totalSize": 7, "done": true})).unwrap();
        assert_eq!(page.total_size, 7);
        assert!(page.records.is_empty());
        assert!(page.next_records_url.is_none());
    }

    #[tokio::test]
    async fn test_query_all_follows_next_records_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query"))
            .and(query_param("q", "SELECT Id FROM Account"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalSize": 3,
                "done": false,
                "nextRecordsUrl": "/services/data/v62.0/query/01gD0000002HU6KIAW-2000",
                "records": [{"Id": "001000000000001"}, {"Id": "001000000000002"}]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/query/01gD0000002HU6KIAW-2000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalSize": 3,
                "done": true,
                "records": [{"Id": "001000000000003"}]
            })))
            .mount(&mock_server)
            .await;

        let client = SalesforceClient::new(mock_server.uri(), "token").unwrap();
        let records: Vec<serde_json::Value> =
            client.query_all("SELECT Id FROM Account").await.unwrap();

        let ids: Vec<&str> = records.iter().filter_map(|r| r["Id"].as_str()).collect();
        assert_eq!(ids, vec!["001000000000001", "001000000000002", "001000000000003"]);
    }

    #[tokio::test]
    async fn test_patch_and_delete_return_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/services/data/v62.0/sobjects/Account/001000000000001"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/services/data/v62.0/sobjects/Account/001000000000001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = SalesforceClient::new(mock_server.uri(), "token").unwrap();
        let status = client
            .rest_patch(
                "sobjects/Account/001000000000001",
                &serde_json::json!({"Name": "Acme"}),
            )
            .await
            .unwrap();
        assert_eq!(status, 204);

        let status = client
            .rest_delete("sobjects/Account/001000000000001")
            .await
            .unwrap();
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_restful_empty_body_is_null() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/services/data/v62.0/sobjects/Account/001000000000001"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = SalesforceClient::new(mock_server.uri(), "token").unwrap();
        let value = client
            .restful(
                RequestMethod::Delete,
                "sobjects/Account/001000000000001",
                &[],
                None,
            )
            .await
            .unwrap();
        assert!(value.is_null());
    }
}
