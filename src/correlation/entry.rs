//! Correlated log line rendering.
//!
//! Client and proxy lines share one pipe-delimited shape so both streams
//! interleave in external log tooling:
//!
//! ```text
//! client | id123 | [] INFO | Client Request | start |2024-01-01|10:00:00.000
//! svcA | id123 | [] INFO |op| start |2024-01-01|10:00:00.000
//! ```

use std::fmt;

/// Operation label used for every client-side line.
pub const CLIENT_OPERATION: &str = "Client Request";

/// Start or end of a timed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::End => "end",
        }
    }

    /// Marker that terminates the operation label in a proxy header.
    pub fn marker(&self) -> &'static str {
        match self {
            Phase::Start => "- start",
            Phase::End => "- end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who observed the instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    Client,
    /// Proxy-side record, labelled with the service name from the header.
    Proxy(String),
}

/// One line of the correlated trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelatedLogEntry {
    pub source: LogSource,
    pub correlation_id: String,
    pub operation: String,
    pub phase: Phase,
    /// `<date>|<time>`
    pub timestamp: String,
}

impl CorrelatedLogEntry {
    pub fn client(correlation_id: &str, phase: Phase, timestamp: String) -> Self {
        Self {
            source: LogSource::Client,
            correlation_id: correlation_id.to_string(),
            operation: CLIENT_OPERATION.to_string(),
            phase,
            timestamp,
        }
    }
}

impl fmt::Display for CorrelatedLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            LogSource::Client => write!(
                f,
                "client | {} | [] INFO | {} | {} |{}",
                self.correlation_id, self.operation, self.phase, self.timestamp
            ),
            LogSource::Proxy(label) => write!(
                f,
                "{} | {} | [] INFO |{}| {} |{}",
                label, self.correlation_id, self.operation, self.phase, self.timestamp
            ),
        }
    }
}
