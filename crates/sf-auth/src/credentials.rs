//! Credentials trait and the session-holding implementation.
//!
//! All credential types implement custom Debug to redact sensitive data.

use sfquerier_client::{ClientConfig, SalesforceClient, DEFAULT_API_VERSION};

use crate::error::{Error, ErrorKind, Result};

/// Trait for Salesforce credentials.
pub trait Credentials: Send + Sync {
    /// Get the Salesforce instance URL.
    fn instance_url(&self) -> &str;

    /// Get the access token (OAuth token or SOAP session id).
    fn access_token(&self) -> &str;

    /// Get the API version (e.g., "62.0").
    fn api_version(&self) -> &str;

    /// Returns true if the credentials appear to be valid (non-empty).
    fn is_valid(&self) -> bool {
        !self.instance_url().is_empty() && !self.access_token().is_empty()
    }
}

/// An instance URL plus a live session token.
///
/// The access token is redacted in Debug output.
#[derive(Clone)]
pub struct SalesforceCredentials {
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl SalesforceCredentials {
    /// Create new credentials with the given values.
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: api_version.into(),
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required:
    /// - `SF_INSTANCE_URL` or `SALESFORCE_INSTANCE_URL`
    /// - `SF_ACCESS_TOKEN` or `SALESFORCE_ACCESS_TOKEN`
    ///
    /// Optional:
    /// - `SF_API_VERSION` or `SALESFORCE_API_VERSION` (default: [`DEFAULT_API_VERSION`])
    pub fn from_env() -> Result<Self> {
        let instance_url = env_var("SF_INSTANCE_URL", "SALESFORCE_INSTANCE_URL")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_INSTANCE_URL".to_string())))?;

        let access_token = env_var("SF_ACCESS_TOKEN", "SALESFORCE_ACCESS_TOKEN")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_ACCESS_TOKEN".to_string())))?;

        let api_version = env_var("SF_API_VERSION", "SALESFORCE_API_VERSION")
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self::new(instance_url, access_token, api_version))
    }

    /// Change the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the base REST API URL for this org.
    pub fn rest_api_url(&self) -> String {
        format!("{}/services/data/v{}", self.instance_url, self.api_version)
    }

    /// Build an authenticated HTTP client for this session.
    pub fn client(&self) -> Result<SalesforceClient> {
        self.client_with_config(ClientConfig::default())
    }

    /// Build an authenticated HTTP client with custom transport settings.
    pub fn client_with_config(&self, config: ClientConfig) -> Result<SalesforceClient> {
        if !self.is_valid() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "instance URL and access token must not be empty".to_string(),
            )));
        }
        let client = SalesforceClient::with_config(&self.instance_url, &self.access_token, config)
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;
        Ok(client.with_api_version(&self.api_version))
    }
}

impl Credentials for SalesforceCredentials {
    fn instance_url(&self) -> &str {
        &self.instance_url
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }
}

/// First non-empty value among a primary and a fallback variable.
pub(crate) fn env_var(primary: &str, fallback: &str) -> Option<String> {
    [primary, fallback]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds =
            SalesforceCredentials::new("https://acme.my.salesforce.com/", "00Dsession", "52.0");

        assert_eq!(creds.instance_url(), "https://acme.my.salesforce.com");
        assert_eq!(creds.access_token(), "00Dsession");
        assert_eq!(creds.api_version(), "52.0");
        assert!(creds.is_valid());
        assert_eq!(
            creds.rest_api_url(),
            "https://acme.my.salesforce.com/services/data/v52.0"
        );
    }

    #[test]
    fn test_invalid_credentials_refuse_client() {
        let creds = SalesforceCredentials::new("", "", "62.0");
        assert!(!creds.is_valid());

        let err = creds.client().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
    }

    #[test]
    fn test_client_carries_session() {
        let creds = SalesforceCredentials::new("https://na1.salesforce.com", "00Dtoken", "58.0");
        let client = creds.client().unwrap();

        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
        assert_eq!(client.api_version(), "58.0");
        assert_eq!(client.access_token(), "00Dtoken");
    }

    #[test]
    fn test_credentials_debug_redacts_tokens() {
        let creds = SalesforceCredentials::new(
            "https://test.salesforce.com",
            "super_secret_session_12345",
            "62.0",
        );

        let debug_output = format!("{:?}", creds);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_session_12345"));
        assert!(debug_output.contains("test.salesforce.com"));
        assert!(debug_output.contains("62.0"));
    }
}
