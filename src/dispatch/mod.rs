//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! ServiceSpec + RunContext
//!     → dispatcher.rs (build request, time the round trip)
//!     → Outcome: Success | HttpError | TransportError
//!
//! Correlation id from the proxy headers:
//!     → fetcher.rs (POST <urlPrefix>/log/get?id=<id>)
//!     → extended log text, or the error's description
//! ```
//!
//! # Design Decisions
//! - One reqwest client per run, shared by dispatcher and fetcher
//! - Every call has connect and request timeouts
//! - No retries; a failed call is reported and the run moves on
//! - The timing window closes when the response head arrives, before the
//!   body is read

pub mod client;
pub mod dispatcher;
pub mod fetcher;
pub mod types;

pub use client::build_http_client;
pub use dispatcher::RequestDispatcher;
pub use fetcher::LogFetcher;
pub use types::{DispatchError, Outcome, RunContext, SuccessResponse};
