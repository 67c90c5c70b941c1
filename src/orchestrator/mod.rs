//! Run orchestration.
//!
//! # Data Flow
//! ```text
//! CrawlerConfig
//!     → for each ServiceSpec, in order:
//!         disabled  → skip notice (log only)
//!         enabled   → pacing delay (after the first dispatched service)
//!                   → RequestDispatcher
//!                   → 200:     parse headers → 4 correlated lines
//!                              → LogFetcher when a correlation id exists
//!                   → non-200: status line + body dump
//!                   → error:   diagnostic (log only)
//!     → RunReport
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; one outbound call in flight at a time
//! - A failed service never aborts the run
//! - Only output stream write failures end the run early

pub mod state;

use std::io::{self, Write};

use crate::config::{CrawlerConfig, RunConfig, ServiceSpec};
use crate::correlation::header::parse_header;
use crate::correlation::timing::client_entries;
use crate::correlation::Phase;
use crate::dispatch::{
    build_http_client, DispatchError, LogFetcher, Outcome, RequestDispatcher, RunContext,
    SuccessResponse,
};
use crate::observability::metrics;

pub use state::{Correlation, FailureKind, RunReport, ServiceState};

/// Drives one crawl run and writes the correlated log stream to `out`.
pub struct Orchestrator<W> {
    context: RunContext,
    services: Vec<ServiceSpec>,
    run: RunConfig,
    dispatcher: RequestDispatcher,
    fetcher: LogFetcher,
    out: W,
}

impl<W: Write> Orchestrator<W> {
    /// Create an orchestrator with a fresh HTTP client built from `config.run`.
    pub fn new(config: CrawlerConfig, out: W) -> Result<Self, DispatchError> {
        let client = build_http_client(&config.run)?;
        let context = config.run_context();

        Ok(Self {
            context,
            services: config.services,
            run: config.run,
            dispatcher: RequestDispatcher::new(client.clone()),
            fetcher: LogFetcher::new(client),
            out,
        })
    }

    /// Process every configured service in order.
    pub async fn run(&mut self) -> io::Result<RunReport> {
        let mut report = RunReport::pending(self.services.len());
        let mut dispatched_any = false;

        for index in 0..self.services.len() {
            let number = index + 1;
            let spec = self.services[index].clone();

            if !spec.enabled {
                tracing::info!(service = number, path = %spec.path, "Processing service: skipped");
                metrics::record_service_outcome("skipped");
                report.services[index] = ServiceState::Skipped;
                continue;
            }

            if dispatched_any {
                tokio::time::sleep(self.run.pacing_delay()).await;
            }
            dispatched_any = true;

            tracing::info!(service = number, method = %spec.method, path = %spec.path, "Processing service");
            report.services[index] = ServiceState::Dispatching;

            let state = self.process(&spec).await?;
            self.out.flush()?;

            tracing::info!(service = number, state = %state, "End service");
            report.services[index] = state;
        }

        Ok(report)
    }

    /// Consume the orchestrator and return the output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    async fn process(&mut self, spec: &ServiceSpec) -> io::Result<ServiceState> {
        let outcome = self.dispatcher.dispatch(&self.context, spec).await;

        metrics::record_service_outcome(outcome.label());
        if let Some(timing) = outcome.timing() {
            metrics::record_client_latency(&spec.path, timing.duration());
        }

        match outcome {
            Outcome::TransportError(e) => {
                tracing::error!(path = %spec.path, error = %e, "Request failed");
                Ok(ServiceState::Failed(FailureKind::Transport))
            }
            Outcome::HttpError { status, body, .. } => {
                tracing::warn!(path = %spec.path, status = status.as_u16(), "Service returned non-200 status");
                writeln!(self.out, "Error {}", status.as_u16())?;
                writeln!(self.out, "body: {}", body)?;
                Ok(ServiceState::Failed(FailureKind::Http(status.as_u16())))
            }
            Outcome::Success(success) => self.correlate(success).await,
        }
    }

    async fn correlate(&mut self, success: SuccessResponse) -> io::Result<ServiceState> {
        tracing::debug!(body = %success.body, "Response body");

        let parsed = parse_header(success.start_header.as_deref(), Phase::Start).and_then(|start| {
            parse_header(success.end_header.as_deref(), Phase::End).map(|end| (start, end))
        });
        let (proxy_start, proxy_end) = match parsed {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    start_header = ?success.start_header,
                    end_header = ?success.end_header,
                    "Malformed proxy timing header, skipping correlation"
                );
                return Ok(ServiceState::Succeeded(Correlation::Malformed));
            }
        };

        if proxy_end.correlation_id != proxy_start.correlation_id {
            tracing::warn!(
                start_id = %proxy_start.correlation_id,
                end_id = %proxy_end.correlation_id,
                "Proxy start and end headers carry different correlation ids"
            );
        }

        let id = proxy_start.correlation_id.clone();
        let [client_start, client_end] = client_entries(&id, &success.timing);
        for entry in [client_start, client_end, proxy_start.to_entry(), proxy_end.to_entry()] {
            writeln!(self.out, "{entry}")?;
        }

        if !proxy_start.has_correlation_id() {
            return Ok(ServiceState::Succeeded(Correlation::Uncorrelated));
        }

        if self.run.fetch_extended_log {
            tracing::info!(correlation_id = %id, "Fetching extended log");
            metrics::record_extended_log_fetch();
            let extended = self.fetcher.fetch_extended_log(&self.context, &id).await;
            write!(self.out, "{extended}")?;
            if !extended.ends_with('\n') {
                writeln!(self.out)?;
            }
        }

        Ok(ServiceState::Succeeded(Correlation::Correlated(id)))
    }
}
