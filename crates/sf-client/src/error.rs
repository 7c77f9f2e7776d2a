//! Error types for the transport layer.

use std::time::Duration;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if Salesforce reported the resource as missing (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Returns true if Salesforce rejected the request as malformed (HTTP 400).
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedRequest { .. })
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited { .. })
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Resource not found (HTTP 404).
    #[error("{error_code}: resource {url} not found. {message}")]
    NotFound {
        url: String,
        error_code: String,
        message: String,
    },

    /// Malformed request (HTTP 400): unknown field, missing required field,
    /// bad SOQL, delete blocked by dependents.
    #[error("{error_code}: malformed request {url}. {message}")]
    MalformedRequest {
        url: String,
        error_code: String,
        message: String,
    },

    /// Any other Salesforce error body on a non-success status.
    #[error("Salesforce API error ({status}): {error_code} - {message}")]
    SalesforceApi {
        status: u16,
        error_code: String,
        message: String,
        fields: Vec<String>,
    },

    /// Non-success HTTP status without a Salesforce error body.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limited{}", retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    /// Authentication error (HTTP 401).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization error (HTTP 403).
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_and_malformed_predicates() {
        let err = Error::new(ErrorKind::NotFound {
            url: "https://na1.salesforce.com/services/data/v62.0/sobjects/Account/001000000000001".into(),
            error_code: "NOT_FOUND".into(),
            message: "The requested resource does not exist".into(),
        });
        assert!(err.is_not_found());
        assert!(!err.is_malformed());

        let err = Error::new(ErrorKind::MalformedRequest {
            url: "https://na1.salesforce.com/services/data/v62.0/sobjects/Account".into(),
            error_code: "REQUIRED_FIELD_MISSING".into(),
            message: "Required fields are missing: [Name]".into(),
        });
        assert!(err.is_malformed());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_kind_display_messages() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::NotFound {
                    url: "sobjects/Case/500000000000001".into(),
                    error_code: "NOT_FOUND".into(),
                    message: "gone".into(),
                },
                "NOT_FOUND: resource sobjects/Case/500000000000001 not found. gone",
            ),
            (
                ErrorKind::MalformedRequest {
                    url: "sobjects/Account".into(),
                    error_code: "INVALID_FIELD".into(),
                    message: "No such column 'Foo__c'".into(),
                },
                "INVALID_FIELD: malformed request sobjects/Account. No such column 'Foo__c'",
            ),
            (
                ErrorKind::SalesforceApi {
                    status: 409,
                    error_code: "ENTITY_IS_LOCKED".into(),
                    message: "locked".into(),
                    fields: vec![],
                },
                "Salesforce API error (409): ENTITY_IS_LOCKED - locked",
            ),
            (
                ErrorKind::Http {
                    status: 500,
                    message: "Internal Server Error".into(),
                },
                "HTTP error: 500 Internal Server Error",
            ),
            (
                ErrorKind::RateLimited {
                    retry_after: Some(Duration::from_secs(30)),
                },
                "retry after",
            ),
            (ErrorKind::RateLimited { retry_after: None }, "Rate limited"),
            (
                ErrorKind::Authentication("INVALID_SESSION_ID".into()),
                "Authentication error: INVALID_SESSION_ID",
            ),
            (ErrorKind::Timeout, "Request timeout"),
            (
                ErrorKind::Config("missing field".into()),
                "Configuration error: missing field",
            ),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::other("socket closed");
        let err = Error::with_source(ErrorKind::Connection("reset".into()), source_err);

        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "Connection error: reset");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("Invalid URL"));
    }
}
