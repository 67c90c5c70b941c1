//! Single service dispatch.
//!
//! # Responsibilities
//! - Build the request from a ServiceSpec and the RunContext
//! - Time the round trip
//! - Classify the response by status code
//! - Extract the proxy timing headers from 200 responses

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};

use crate::config::ServiceSpec;
use crate::correlation::{TimingRecorder, END_LOG_HEADER, START_LOG_HEADER};
use crate::dispatch::types::{DispatchError, Outcome, RunContext, SuccessResponse};

/// Issues configured service calls.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    client: Client,
}

impl RequestDispatcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Send one service call and classify the result. Never retries.
    pub async fn dispatch(&self, context: &RunContext, spec: &ServiceSpec) -> Outcome {
        let method = match Method::from_bytes(spec.method.as_bytes()) {
            Ok(m) => m,
            Err(_) => return Outcome::TransportError(DispatchError::InvalidMethod(spec.method.clone())),
        };
        let url = context.url_for(&spec.path);

        tracing::debug!(method = %method, url = %url, "Sending request");

        let request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, &context.auth_token)
            .body(spec.param_body.clone());

        let recorder = TimingRecorder::start();
        let result = request.send().await;
        let timing = recorder.finish();

        let response = match result {
            Ok(r) => r,
            Err(e) => return Outcome::TransportError(DispatchError::from_send(e)),
        };

        let status = response.status();
        tracing::info!(
            url = %url,
            status = status.as_u16(),
            client_time_secs = timing.duration().as_secs_f64(),
            "Response received"
        );

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };
        let start_header = header(START_LOG_HEADER);
        let end_header = header(END_LOG_HEADER);

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Outcome::TransportError(DispatchError::Body(e)),
        };

        if status != StatusCode::OK {
            return Outcome::HttpError { status, body, timing };
        }

        Outcome::Success(SuccessResponse {
            body,
            timing,
            start_header,
            end_header,
        })
    }
}
