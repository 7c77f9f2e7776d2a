//! HTTP response handling and Salesforce error classification.

use std::sync::LazyLock;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around a reqwest response.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Returns true for 204 No Content.
    pub fn is_no_content(&self) -> bool {
        self.status() == crate::NO_CONTENT
    }

    /// The final URL of the response.
    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Retry-After header as a Duration (seconds form only).
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")?
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Deserialize the body as JSON, mapping an empty body to `Value::Null`.
    ///
    /// Raw REST calls hit endpoints that answer 204 with no body as well as
    /// endpoints that answer 200 with a document.
    pub async fn json_or_null(self) -> Result<serde_json::Value> {
        let body = self.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(Into::into)
    }
}

/// Extension trait for Salesforce-specific response checks.
pub trait ResponseExt {
    /// Turn a non-success response into a classified error.
    fn check_salesforce_error(self) -> impl std::future::Future<Output = Result<Response>> + Send;
}

impl ResponseExt for Response {
    async fn check_salesforce_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let url = self.url().to_string();
        let retry_after = self.retry_after();
        let body = self.text().await.unwrap_or_default();

        if status == 429 {
            return Err(Error::new(ErrorKind::RateLimited { retry_after }));
        }
        Err(parse_error_response(status, &url, &body))
    }
}

/// Classify an error body by status.
///
/// 400 and 404 are the two failure kinds callers branch on; everything else
/// keeps the Salesforce code when one is present.
pub(crate) fn parse_error_response(status: u16, url: &str, body: &str) -> Error {
    let parsed = first_salesforce_error(body);

    let (error_code, message, fields) = match parsed {
        Some(err) => (
            err.error_code,
            sanitize_error_message(&err.message),
            err.fields.unwrap_or_default(),
        ),
        None => (
            default_error_code(status).to_string(),
            sanitize_error_message(body),
            Vec::new(),
        ),
    };

    let kind = match status {
        400 => ErrorKind::MalformedRequest {
            url: url.to_string(),
            error_code,
            message,
        },
        404 => ErrorKind::NotFound {
            url: url.to_string(),
            error_code,
            message,
        },
        401 => ErrorKind::Authentication(format!("{}: {}", error_code, message)),
        403 => ErrorKind::Authorization(format!("{}: {}", error_code, message)),
        429 => ErrorKind::RateLimited { retry_after: None },
        _ if !fields.is_empty() || error_code != default_error_code(status) => {
            ErrorKind::SalesforceApi {
                status,
                error_code,
                message,
                fields,
            }
        }
        _ => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}

fn default_error_code(status: u16) -> &'static str {
    match status {
        400 => "BAD_REQUEST",
        401 => "INVALID_SESSION_ID",
        403 => "FORBIDDEN",
        404 => "NOT_FOUND",
        _ => "UNKNOWN_ERROR",
    }
}

/// Salesforce sends either `[{"errorCode", "message"}]` or a single object.
fn first_salesforce_error(body: &str) -> Option<SalesforceErrorResponse> {
    if let Ok(errors) = serde_json::from_str::<Vec<SalesforceErrorResponse>>(body) {
        return errors.into_iter().next();
    }
    serde_json::from_str::<SalesforceErrorResponse>(body).ok()
}

static TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").expect("static token pattern")
});

static SESSION_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").expect("static session pattern")
});

/// Sanitize an error message before it is stored or logged.
///
/// Redacts anything shaped like an access token or session id and caps the
/// length at 500 characters.
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let redacted = TOKEN_PATTERN.replace_all(message, "[REDACTED_TOKEN]");
    let mut sanitized = SESSION_PATTERN
        .replace_all(&redacted, "sid=[REDACTED]")
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

/// Salesforce API error response format.
#[derive(Debug, serde::Deserialize)]
struct SalesforceErrorResponse {
    #[serde(alias = "errorCode")]
    error_code: String,
    message: String,
    fields: Option<Vec<String>>,
}
