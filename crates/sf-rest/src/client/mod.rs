//! Salesforce REST API client.
//!
//! This client wraps `SalesforceClient` from `sfquerier-client` and provides
//! the sObject, query, search and raw REST operations the entity layer
//! builds on.

use sfquerier_auth::SalesforceCredentials;
use sfquerier_client::security::{soql, url as url_security};
use sfquerier_client::{ClientConfig, SalesforceClient};

use crate::error::{Error, ErrorKind, Result};

mod crud;
mod query;
mod raw;
mod search;

/// Salesforce REST API client.
///
/// # Example
///
/// ```rust,ignore
/// use sfquerier_rest::SalesforceRestClient;
///
/// let client = SalesforceRestClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
///
/// let created = client.create("Contact", &json!({"LastName": "Mahameed"})).await?;
/// let status = client.delete("Contact", created["id"].as_str().unwrap()).await?;
/// assert_eq!(status, 204);
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a new REST client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(instance_url, access_token, config)?;
        Ok(Self { client })
    }

    /// Create a REST client for an authenticated session.
    pub fn from_credentials(credentials: &SalesforceCredentials) -> Result<Self> {
        Ok(Self {
            client: credentials.client()?,
        })
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// `sobjects/{sobject}`, refusing names that are not plain identifiers.
    fn sobject_collection_path(&self, sobject: &str) -> Result<String> {
        if !soql::is_safe_sobject_name(sobject) {
            return Err(self.refused(
                &format!("sobjects/{}", sobject),
                "INVALID_TYPE",
                format!("Invalid sObject name: {}", sobject),
            ));
        }
        Ok(format!("sobjects/{}", sobject))
    }

    /// `sobjects/{sobject}/{id}`, refusing bad names and malformed ids.
    fn sobject_record_path(&self, sobject: &str, id: &str) -> Result<String> {
        let collection = self.sobject_collection_path(sobject)?;
        url_security::sobject_path(sobject, id).ok_or_else(|| {
            self.refused(
                &format!("{}/{}", collection, url_security::encode_param(id)),
                "MALFORMED_ID",
                format!("Invalid {} id: {}", sobject, id),
            )
        })
    }

    fn refused(&self, path: &str, error_code: &str, message: String) -> Error {
        Error::new(ErrorKind::MalformedRequest {
            url: self.client.rest_url(path),
            error_code: error_code.to_string(),
            message,
        })
    }
}
