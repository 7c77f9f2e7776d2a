//! Error types for sfquerier-rest.

/// Result type alias for REST operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for REST operations.
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

    /// Returns true if the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Returns true if the request was rejected as malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedRequest { .. })
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// HTTP 404 from Salesforce.
    #[error("{error_code}: resource {url} not found. {message}")]
    NotFound {
        url: String,
        error_code: String,
        message: String,
    },

    /// HTTP 400 from Salesforce, or a request refused locally before it was
    /// sent (invalid sObject name or record id).
    #[error("{error_code}: malformed request {url}. {message}")]
    MalformedRequest {
        url: String,
        error_code: String,
        message: String,
    },

    /// Any other Salesforce-reported error.
    #[error("Salesforce error: {error_code} - {message}")]
    Salesforce { error_code: String, message: String },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Transport failure (timeouts, connection, auth, rate limits).
    #[error("Client error: {0}")]
    Client(String),
}

impl From<sfquerier_client::Error> for Error {
    fn from(err: sfquerier_client::Error) -> Self {
        use sfquerier_client::ErrorKind as ClientKind;

        let kind = match err.kind {
            ClientKind::NotFound {
                url,
                error_code,
                message,
            } => ErrorKind::NotFound {
                url,
                error_code,
                message,
            },
            ClientKind::MalformedRequest {
                url,
                error_code,
                message,
            } => ErrorKind::MalformedRequest {
                url,
                error_code,
                message,
            },
            ClientKind::SalesforceApi {
                error_code,
                message,
                ..
            } => ErrorKind::Salesforce {
                error_code,
                message,
            },
            ClientKind::Json(message) => ErrorKind::Json(message),
            other => ErrorKind::Client(other.to_string()),
        };

        Self {
            kind,
            source: err.source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<sfquerier_auth::Error> for Error {
    fn from(err: sfquerier_auth::Error) -> Self {
        Error::new(ErrorKind::Client(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_and_malformed_survive_conversion() {
        let client_err = sfquerier_client::Error::new(sfquerier_client::ErrorKind::NotFound {
            url: "https://na1.salesforce.com/services/data/v62.0/sobjects/Case/500000000000001"
                .to_string(),
            error_code: "NOT_FOUND".to_string(),
            message: "The requested resource does not exist".to_string(),
        });
        let err: Error = client_err.into();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("NOT_FOUND: resource"));

        let client_err =
            sfquerier_client::Error::new(sfquerier_client::ErrorKind::MalformedRequest {
                url: "https://na1.salesforce.com/services/data/v62.0/sobjects/Account".to_string(),
                error_code: "INVALID_FIELD".to_string(),
                message: "No such column 'Nme' on sobject of type Account".to_string(),
            });
        let err: Error = client_err.into();
        assert!(err.is_malformed());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_other_client_errors_flatten() {
        let err: Error = sfquerier_client::Error::new(sfquerier_client::ErrorKind::Timeout).into();
        assert!(matches!(err.kind, ErrorKind::Client(ref m) if m == "Request timeout"));

        let err: Error = sfquerier_client::Error::new(sfquerier_client::ErrorKind::SalesforceApi {
            status: 500,
            error_code: "UNKNOWN_EXCEPTION".to_string(),
            message: "An unexpected error occurred".to_string(),
            fields: vec![],
        })
        .into();
        assert!(matches!(
            err.kind,
            ErrorKind::Salesforce { ref error_code, .. } if error_code == "UNKNOWN_EXCEPTION"
        ));
    }
}
