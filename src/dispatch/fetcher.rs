//! Extended server-side log retrieval.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use crate::dispatch::types::RunContext;

/// Path of the extended log endpoint, relative to the URL prefix.
pub const LOG_FETCH_PATH: &str = "/log/get";

/// Best-effort fetcher for the log stored under a correlation id.
#[derive(Debug, Clone)]
pub struct LogFetcher {
    client: Client,
}

impl LogFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the extended log for `correlation_id`.
    ///
    /// Never fails: a transport or read error is returned as its description
    /// so the caller can emit it in place of the log.
    pub async fn fetch_extended_log(&self, context: &RunContext, correlation_id: &str) -> String {
        let url = context.url_for(LOG_FETCH_PATH);
        tracing::debug!(url = %url, correlation_id = %correlation_id, "Fetching extended log");

        let result = self
            .client
            .post(&url)
            .query(&[("id", correlation_id)])
            .header(AUTHORIZATION, &context.auth_token)
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(correlation_id = %correlation_id, error = %e, "Extended log request failed");
                return e.to_string();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(correlation_id = %correlation_id, status = %status, "Extended log endpoint returned non-success status");
        }

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(correlation_id = %correlation_id, error = %e, "Failed to read extended log");
                e.to_string()
            }
        }
    }
}
