//! Username/password session login via the SOAP partner API.
//!
//! Salesforce accepts a password login in two forms: the password with the
//! user's security token appended, or the bare password scoped to an
//! organization id (for orgs that trust the caller's IP range). Either way the
//! answer is a session id usable as a bearer token against the REST API.

use sfquerier_client::security::xml;
use sfquerier_client::{DEFAULT_API_VERSION, USER_AGENT};
use tracing::{info, instrument, warn};

use crate::credentials::{env_var, SalesforceCredentials};
use crate::error::{Error, ErrorKind, Result};
use crate::PRODUCTION_DOMAIN;

const MISSING_SECRET: &str = "You must submit username and password either a security token or organizationId for authentication";

/// The second factor that accompanies the password.
#[derive(Clone, PartialEq, Eq)]
pub enum LoginSecret {
    /// Appended to the password.
    SecurityToken(String),
    /// Sent in a `LoginScopeHeader`.
    OrganizationId(String),
}

impl std::fmt::Debug for LoginSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SecurityToken(_) => f.write_str("SecurityToken([REDACTED])"),
            Self::OrganizationId(id) => f.debug_tuple("OrganizationId").field(id).finish(),
        }
    }
}

/// Builder for a username/password login.
///
/// # Example
///
/// ```rust,ignore
/// let creds = PasswordLogin::new("ops@acme.com", "hunter2")
///     .organization_id("00D000000000001")
///     .domain("test")
///     .login()
///     .await?;
/// ```
#[derive(Clone)]
pub struct PasswordLogin {
    username: String,
    password: String,
    secret: Option<LoginSecret>,
    domain: String,
    login_url: Option<String>,
    api_version: String,
}

impl std::fmt::Debug for PasswordLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordLogin")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("secret", &self.secret)
            .field("domain", &self.domain)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl PasswordLogin {
    /// Start a login for the given user. The domain defaults to `login`.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            secret: None,
            domain: PRODUCTION_DOMAIN.to_string(),
            login_url: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    /// Authenticate with the user's security token.
    pub fn security_token(mut self, token: impl Into<String>) -> Self {
        self.secret = Some(LoginSecret::SecurityToken(token.into()));
        self
    }

    /// Authenticate with an organization id instead of a security token.
    pub fn organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.secret = Some(LoginSecret::OrganizationId(organization_id.into()));
        self
    }

    /// Login host prefix: `login`, `test`, or a My Domain such as `acme.my`.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Override the login base URL entirely (e.g. a mock server).
    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }

    /// API version used for the SOAP endpoint and the resulting credentials.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Read a login from the environment.
    ///
    /// - `SF_USERNAME` / `SALESFORCE_USERNAME` (required)
    /// - `SF_PASSWORD` / `SALESFORCE_PASSWORD` (required)
    /// - `SF_SECURITY_TOKEN` / `SALESFORCE_SECURITY_TOKEN`, or
    ///   `SF_ORGANIZATION_ID` / `SALESFORCE_ORGANIZATION_ID`
    /// - `SF_DOMAIN` / `SALESFORCE_DOMAIN` (default `login`)
    /// - `SF_API_VERSION` / `SALESFORCE_API_VERSION`
    pub fn from_env() -> Result<Self> {
        let username = env_var("SF_USERNAME", "SALESFORCE_USERNAME")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_USERNAME".to_string())))?;
        let password = env_var("SF_PASSWORD", "SALESFORCE_PASSWORD")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_PASSWORD".to_string())))?;

        let mut login = Self::new(username, password);
        if let Some(token) = env_var("SF_SECURITY_TOKEN", "SALESFORCE_SECURITY_TOKEN") {
            login = login.security_token(token);
        } else if let Some(org) = env_var("SF_ORGANIZATION_ID", "SALESFORCE_ORGANIZATION_ID") {
            login = login.organization_id(org);
        }
        if let Some(domain) = env_var("SF_DOMAIN", "SALESFORCE_DOMAIN") {
            login = login.domain(domain);
        }
        if let Some(version) = env_var("SF_API_VERSION", "SALESFORCE_API_VERSION") {
            login = login.with_api_version(version);
        }

        login.validate()?;
        Ok(login)
    }

    /// Check that a username, a password and one secret are present.
    pub fn validate(&self) -> Result<()> {
        let secret_present = match &self.secret {
            Some(LoginSecret::SecurityToken(token)) => !token.is_empty(),
            Some(LoginSecret::OrganizationId(org)) => !org.is_empty(),
            None => false,
        };
        if self.username.is_empty() || self.password.is_empty() || !secret_present {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                MISSING_SECRET.to_string(),
            )));
        }
        Ok(())
    }

    /// The SOAP endpoint the login is posted to.
    pub fn soap_url(&self) -> String {
        let base = self
            .login_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.salesforce.com", self.domain));
        format!("{}/services/Soap/u/{}", base, self.api_version)
    }

    /// Perform the login and return session credentials.
    #[instrument(skip(self), fields(username = %self.username, domain = %self.domain))]
    pub async fn login(&self) -> Result<SalesforceCredentials> {
        self.validate()?;

        let response = reqwest::Client::new()
            .post(self.soap_url())
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login")
            .header("User-Agent", USER_AGENT)
            .body(self.envelope())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if let Some((fault_code, message)) = parse_fault(&body) {
            warn!(%fault_code, "Salesforce login rejected");
            return Err(Error::new(ErrorKind::Login {
                fault_code,
                message,
            }));
        }
        if !status.is_success() {
            return Err(Error::new(ErrorKind::Http(format!(
                "login endpoint returned {}",
                status.as_u16()
            ))));
        }

        let session_id = extract_element(&body, "sessionId").ok_or_else(|| {
            Error::new(ErrorKind::InvalidResponse("missing sessionId".to_string()))
        })?;
        let server_url = extract_element(&body, "serverUrl").ok_or_else(|| {
            Error::new(ErrorKind::InvalidResponse("missing serverUrl".to_string()))
        })?;
        let instance_url = instance_url_from_server_url(&server_url)?;

        info!(%instance_url, "Logged in to Salesforce");
        Ok(SalesforceCredentials::new(
            instance_url,
            session_id,
            &self.api_version,
        ))
    }

    fn envelope(&self) -> String {
        let (password, scope_header) = match &self.secret {
            Some(LoginSecret::SecurityToken(token)) => {
                (format!("{}{}", self.password, token), String::new())
            }
            Some(LoginSecret::OrganizationId(org)) => (
                self.password.clone(),
                format!(
                    "<urn:LoginScopeHeader><urn:organizationId>{}</urn:organizationId></urn:LoginScopeHeader>",
                    xml::escape(org)
                ),
            ),
            None => (self.password.clone(), String::new()),
        };

        format!(
            r#"<?xml version="1.0" encoding="utf-8" ?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:urn="urn:partner.soap.sforce.com">
  <soapenv:Header>
    <urn:CallOptions><urn:client>{client}</urn:client></urn:CallOptions>{scope_header}
  </soapenv:Header>
  <soapenv:Body>
    <urn:login>
      <urn:username>{username}</urn:username>
      <urn:password>{password}</urn:password>
    </urn:login>
  </soapenv:Body>
</soapenv:Envelope>"#,
            client = USER_AGENT,
            scope_header = scope_header,
            username = xml::escape(&self.username),
            password = xml::escape(&password),
        )
    }
}

/// Text content of the first `<tag>` (optionally `sf:`-prefixed) in `xml`.
fn extract_element(xml: &str, tag: &str) -> Option<String> {
    let end_tag = format!("</{}>", tag);
    for start in [format!("<{}>", tag), format!("<sf:{}>", tag)] {
        if let Some(start_idx) = xml.find(&start) {
            let rest = &xml[start_idx + start.len()..];
            let end_idx = rest
                .find(&end_tag)
                .or_else(|| rest.find(&format!("</sf:{}>", tag)))?;
            return Some(rest[..end_idx].to_string());
        }
    }
    None
}

fn parse_fault(xml: &str) -> Option<(String, String)> {
    let fault_code = extract_element(xml, "faultcode")?;
    let message = extract_element(xml, "faultstring").unwrap_or_else(|| "Unknown error".to_string());
    Some((fault_code, message))
}

/// `https://acme.my.salesforce.com/services/Soap/u/62.0/00D...` to
/// `https://acme.my.salesforce.com`; a `-api` suffix on the first host label
/// is dropped.
fn instance_url_from_server_url(server_url: &str) -> Result<String> {
    let url = url::Url::parse(server_url)?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::new(ErrorKind::InvalidResponse("serverUrl has no host".to_string())))?;
    let host = match host.split_once('.') {
        Some((label, rest)) => match label.strip_suffix("-api") {
            Some(instance) => format!("{}.{}", instance, rest),
            None => host.to_string(),
        },
        None => host.to_string(),
    };
    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}
