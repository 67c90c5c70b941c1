//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator, dispatcher, loader:
//!     → logging.rs (structured diagnostics on stderr)
//!     → metrics.rs (outcome counters, client latency histogram)
//!
//! Consumers:
//!     → operator terminal (stderr)
//!     → Prometheus text snapshot written at the end of a run (optional)
//! ```
//!
//! # Design Decisions
//! - stdout carries only the correlated log stream; diagnostics never mix in
//! - Every run gets a run ID on its root span
//! - Metrics are recorded through the `metrics` facade and are no-ops unless
//!   a recorder is installed

pub mod logging;
pub mod metrics;
