//! Outcome taxonomy for entity operations.
//!
//! Every wrapper method returns [`Result`]. The kinds mirror how a failure
//! happened: rejected locally before any call ([`ErrorKind::MissingId`]),
//! reported by Salesforce ([`ErrorKind::NotFound`],
//! [`ErrorKind::MalformedRequest`], [`ErrorKind::Rejected`]), answered in a
//! way the operation cannot accept ([`ErrorKind::UnexpectedStatus`],
//! [`ErrorKind::UnexpectedShape`]), or anything else ([`ErrorKind::Unknown`]).

use std::fmt;

use sfquerier_rest::SalesforceError;
use tracing::{error, warn};

/// Result type alias for entity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for entity operations.
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

    /// The kind of error that occurred.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Salesforce reported the record or resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound { .. })
    }

    /// Salesforce rejected the request as malformed.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::MalformedRequest { .. })
    }

    /// The call was refused before reaching Salesforce for lack of an id.
    pub fn is_missing_id(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingId { .. })
    }

    pub(crate) fn missing_id(sobject: &str) -> Self {
        warn!(sobject, "{} ID is missing!", sobject);
        Self::new(ErrorKind::MissingId {
            sobject: sobject.to_string(),
        })
    }

    pub(crate) fn unexpected_shape(what: impl Into<String>) -> Self {
        let what = what.into();
        error!(shape = %what, "Unexpected response shape");
        Self::new(ErrorKind::UnexpectedShape(what))
    }

    /// Classify a REST failure for `resource` and log it under `op`.
    ///
    /// Not-found and malformed requests are expected outcomes of bad input
    /// and log at `warn`; everything else logs at `error`.
    pub(crate) fn remote(op: Operation, resource: &str, err: sfquerier_rest::Error) -> Self {
        use sfquerier_rest::ErrorKind as RestKind;

        match err.kind {
            RestKind::NotFound {
                url: _,
                error_code,
                message,
            } => {
                warn!(op = %op, %error_code, "[{}]{}: Resource {} not found. {}", op, error_code, resource, message);
                Self {
                    kind: ErrorKind::NotFound {
                        resource: resource.to_string(),
                        error_code,
                        message,
                    },
                    source: err.source,
                }
            }
            RestKind::MalformedRequest {
                url,
                error_code,
                message,
            } => {
                warn!(op = %op, %error_code, "[{}]{}: Malformed request {}. {}", op, error_code, url, message);
                Self {
                    kind: ErrorKind::MalformedRequest {
                        url,
                        error_code,
                        message,
                    },
                    source: err.source,
                }
            }
            other => {
                let message = other.to_string();
                error!(op = %op, resource, error = %message, "Something went wrong!");
                Self {
                    kind: ErrorKind::Unknown(message),
                    source: err.source,
                }
            }
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// An id-taking operation received no id; nothing was sent.
    #[error("{sobject} ID is missing")]
    MissingId { sobject: String },

    /// Salesforce answered 404.
    #[error("{error_code}: Resource {resource} not found. {message}")]
    NotFound {
        resource: String,
        error_code: String,
        message: String,
    },

    /// Salesforce answered 400: unknown field, missing required field,
    /// invalid SOQL, or a delete blocked by dependent records.
    #[error("{error_code}: Malformed request {url}. {message}")]
    MalformedRequest {
        url: String,
        error_code: String,
        message: String,
    },

    /// A create came back without `success: true` and an id.
    #[error("{sobject} creation failed{}", Rejections(.errors))]
    Rejected {
        sobject: String,
        errors: Vec<SalesforceError>,
    },

    /// An update or delete answered with something other than 204.
    #[error("Unexpected status {status}, expected 204 No Content")]
    UnexpectedStatus { status: u16 },

    /// The response body did not have the shape the operation reads.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Anything else: transport, authentication, rate limiting, server errors.
    #[error("Something went wrong: {0}")]
    Unknown(String),
}

struct Rejections<'a>(&'a [SalesforceError]);

impl fmt::Display for Rejections<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

/// Tag identifying the kind of call in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Get,
    Create,
    Update,
    Delete,
    Query,
    Search,
    Post,
    Patch,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Query => "QUERY",
            Self::Search => "SEARCH",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        })
    }
}
