//! Dispatch context, outcomes and error definitions.

use reqwest::StatusCode;
use thiserror::Error;

use crate::correlation::TimingWindow;

/// Read-only values shared by every call of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub url_prefix: String,
    pub auth_token: String,
}

impl RunContext {
    pub fn new(url_prefix: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            auth_token: auth_token.into(),
        }
    }

    /// `url_prefix + path`, concatenated as-is.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.url_prefix, path)
    }
}

/// Errors that prevent a call from producing an HTTP response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Method string is not a valid HTTP token.
    #[error("invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Connection, TLS or protocol failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Response head arrived but the body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl DispatchError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DispatchError::Timeout(err)
        } else {
            DispatchError::Request(err)
        }
    }
}

/// A 200 response with the raw proxy timing headers.
#[derive(Debug, Clone)]
pub struct SuccessResponse {
    pub body: String,
    pub timing: TimingWindow,
    pub start_header: Option<String>,
    pub end_header: Option<String>,
}

/// Result of dispatching one service.
#[derive(Debug)]
pub enum Outcome {
    Success(SuccessResponse),
    HttpError {
        status: StatusCode,
        body: String,
        timing: TimingWindow,
    },
    TransportError(DispatchError),
}

impl Outcome {
    /// Short label used for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::HttpError { .. } => "http_error",
            Outcome::TransportError(_) => "transport_error",
        }
    }

    pub fn timing(&self) -> Option<&TimingWindow> {
        match self {
            Outcome::Success(success) => Some(&success.timing),
            Outcome::HttpError { timing, .. } => Some(timing),
            Outcome::TransportError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_concatenates() {
        let ctx = RunContext::new("http://x", "t");
        assert_eq!(ctx.url_for("/a"), "http://x/a");

        // No normalization of slashes
        let ctx = RunContext::new("http://x/", "t");
        assert_eq!(ctx.url_for("/a"), "http://x//a");
    }
}
