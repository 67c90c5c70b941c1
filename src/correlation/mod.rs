//! Log correlation subsystem.
//!
//! # Data Flow
//! ```text
//! Successful response:
//!     X-Performance-Tuning-StartLog / EndLog
//!     → header.rs (length-checked split, phase marker strip)
//!     → PerformanceHeaderRecord (proxy start/end + correlation id)
//!
//! Client side:
//!     timing.rs (TimingRecorder around the outbound call)
//!     → TimingWindow
//!
//! Both:
//!     → entry.rs (CorrelatedLogEntry, one pipe-delimited line each)
//!     → client-start, client-end, proxy-start, proxy-end
//! ```
//!
//! # Design Decisions
//! - The line shape is a wire contract for external log tooling; it is
//!   rendered in exactly one place (`entry.rs`)
//! - Header parsing never panics; every malformed value is a `ParseError`
//! - The correlation id comes from the start header

pub mod entry;
pub mod header;
pub mod timing;

pub use entry::{CorrelatedLogEntry, LogSource, Phase};
pub use header::{parse, parse_header, ParseError, PerformanceHeaderRecord, END_LOG_HEADER, START_LOG_HEADER};
pub use timing::{format_client_log, TimingRecorder, TimingWindow};
