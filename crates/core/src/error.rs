//! Unified error types for jobparse.
//!
//! Every failure a vacancy parse can surface maps onto one of these variants,
//! and each variant belongs to either the client-error or the server-error
//! class (see [`Error::http_status`]).

use rmcp::model::{ErrorCode, ErrorData as McpError};
use serde_json::json;

/// Unified error types for the vacancy parsing pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL or HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// URL does not belong to the site the parser was asked to handle.
    #[error("DOMAIN_MISMATCH: URL must point to a vacancy on {expected}")]
    DomainMismatch { expected: &'static str, url: String },

    /// No registered site parser recognizes the URL.
    #[error("UNSUPPORTED_SITE: no parser for {0}")]
    UnsupportedSite(String),

    /// The page could not be fetched (transport error, non-2xx, too large).
    #[error("FETCH_FAILED: request to {site} failed: {reason}")]
    FetchFailed { site: String, reason: String },

    /// The page was fetched but extraction blew up.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),
}

impl Error {
    /// HTTP status class of this error.
    ///
    /// Validation and transport failures are reported as client errors (400),
    /// a page that was fetched but could not be parsed as a server error (500).
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidInput(_) | Error::DomainMismatch { .. } | Error::UnsupportedSite(_) => 400,
            Error::FetchFailed { .. } => 400,
            Error::ParseFailed(_) => 500,
        }
    }

    /// Whether this error was raised before any network I/O happened.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::DomainMismatch { .. } | Error::UnsupportedSite(_))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let status = err.http_status();
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::DomainMismatch { .. } => -32003,
            Error::UnsupportedSite(_) => -32004,
            Error::FetchFailed { .. } => -32008,
            Error::ParseFailed(_) => -32000,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: Some(json!({ "status": status })) }
    }
}
