//! Configuration schema definitions.
//!
//! Field names follow the camelCase document format consumed by the crawler:
//! `{ "urlPrefix", "token", "services": [{ "method", "path", "param", "enable" }] }`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dispatch::RunContext;

/// Root configuration for a crawl run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    /// Base URL every service path is appended to.
    pub url_prefix: String,

    /// Value sent verbatim in the `Authorization` header.
    pub token: String,

    /// Services to call, in order.
    #[serde(default)]
    pub services: Vec<ServiceSpec>,

    /// Pacing, timeouts and secondary fetch settings.
    #[serde(default)]
    pub run: RunConfig,
}

impl CrawlerConfig {
    /// Shared read-only context for every service invocation of the run.
    pub fn run_context(&self) -> RunContext {
        RunContext::new(self.url_prefix.clone(), self.token.clone())
    }
}

/// One configured service call. Identity is its position in `services`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceSpec {
    /// HTTP method, sent as given.
    pub method: String,

    /// Path appended to the URL prefix.
    pub path: String,

    /// Raw request body.
    #[serde(rename = "param", default)]
    pub param_body: String,

    /// Disabled services are skipped without any request.
    #[serde(rename = "enable", default)]
    pub enabled: bool,
}

impl ServiceSpec {
    pub fn new(method: impl Into<String>, path: impl Into<String>, param_body: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            param_body: param_body.into(),
            enabled: true,
        }
    }
}

/// Run-level tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
    /// Pause between two dispatched services in milliseconds.
    pub pacing_delay_ms: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Fetch the extended server-side log when a correlation id is present.
    pub fetch_extended_log: bool,

    /// Honor `HTTP_PROXY` / `HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl RunConfig {
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pacing_delay_ms: 1000,
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            fetch_extended_log: true,
            use_system_proxy: true,
        }
    }
}
