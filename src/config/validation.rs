//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - URL prefix must be an absolute http(s) URL
//! - Every service method must be a valid HTTP method token
//! - Timeouts must be non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CrawlerConfig → Result<(), Vec<ValidationError>>
//! - Disabled services are validated too; they are still part of the document

use reqwest::Method;
use thiserror::Error;

use crate::config::schema::CrawlerConfig;

/// A single semantic problem in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("urlPrefix '{value}' is not a valid http(s) URL: {reason}")]
    InvalidUrlPrefix { value: String, reason: String },

    #[error("service {index}: invalid HTTP method '{method}'")]
    InvalidMethod { index: usize, method: String },

    #[error("service {index}: path must not contain whitespace: '{path}'")]
    InvalidPath { index: usize, path: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Check a deserialized config before it is accepted.
pub fn validate_config(config: &CrawlerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.url_prefix) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrlPrefix {
            value: config.url_prefix.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrlPrefix {
            value: config.url_prefix.clone(),
            reason: e.to_string(),
        }),
    }

    // Indices are 1-based to match the run log.
    for (i, service) in config.services.iter().enumerate() {
        if service.method.is_empty() || Method::from_bytes(service.method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                index: i + 1,
                method: service.method.clone(),
            });
        }
        if service.path.chars().any(char::is_whitespace) {
            errors.push(ValidationError::InvalidPath {
                index: i + 1,
                path: service.path.clone(),
            });
        }
    }

    if config.run.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "connectTimeoutSecs" });
    }
    if config.run.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "requestTimeoutSecs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
