//! Shared HTTP client construction.

use reqwest::Client;

use crate::config::RunConfig;
use crate::dispatch::types::DispatchError;

/// Build the client used for every call of a run.
pub fn build_http_client(run: &RunConfig) -> Result<Client, DispatchError> {
    let mut builder = Client::builder()
        .connect_timeout(run.connect_timeout())
        .timeout(run.request_timeout())
        .user_agent(concat!("log-crawler/", env!("CARGO_PKG_VERSION")));

    if !run.use_system_proxy {
        builder = builder.no_proxy();
    }

    builder.build().map_err(DispatchError::Client)
}
