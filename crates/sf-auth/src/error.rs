//! Error types for sfquerier-auth.
//!
//! Error messages are designed to avoid exposing credential data.

/// Result type alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for auth operations.
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
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Required login inputs are missing.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// SOAP fault returned by the login endpoint.
    #[error("Login failed: {fault_code} - {message}")]
    Login { fault_code: String, message: String },

    /// The login endpoint answered with something that is not a login result.
    #[error("Invalid login response: {0}")]
    InvalidResponse(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Login URLs never carry secrets, but error bodies might echo them.
        let message = err.to_string();
        let sanitized = if message.contains("password") || message.contains("sessionId") {
            "HTTP request failed (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Http(sanitized), err)
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
    fn test_error_kind_display() {
        let err = ErrorKind::Login {
            fault_code: "sf:INVALID_LOGIN".to_string(),
            message: "INVALID_LOGIN: Invalid username, password, security token; or user locked out.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Login failed: sf:INVALID_LOGIN - INVALID_LOGIN: Invalid username, password, security token; or user locked out."
        );

        let err = ErrorKind::EnvVar("SF_ACCESS_TOKEN".to_string());
        assert_eq!(err.to_string(), "Environment variable not set: SF_ACCESS_TOKEN");
    }

    #[test]
    fn test_from_url_parse_error() {
        let err: Error = url::Url::parse("::not a url").unwrap_err().into();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.source.is_some());
    }
}
