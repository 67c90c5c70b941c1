//! Per-service state machine and run report.
//!
//! # State Transitions
//! ```text
//! Pending → Skipped                         (enable == false)
//! Pending → Dispatching → Failed(Transport)
//!                       → Failed(Http)      (status != 200)
//!                       → Succeeded(_)      (status == 200)
//! ```
//!
//! Every terminal state is independent of the services before it.

use std::fmt;

/// How far correlation got for a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    /// A timing header was missing or malformed; nothing was emitted.
    Malformed,
    /// Lines were emitted but the proxy assigned no correlation id.
    Uncorrelated,
    /// Lines were emitted for this id.
    Correlated(String),
}

/// Why a dispatched service failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Http(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceState {
    Pending,
    Skipped,
    Dispatching,
    Failed(FailureKind),
    Succeeded(Correlation),
}

impl ServiceState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ServiceState::Pending | ServiceState::Dispatching)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceState::Pending => f.write_str("pending"),
            ServiceState::Skipped => f.write_str("skipped"),
            ServiceState::Dispatching => f.write_str("dispatching"),
            ServiceState::Failed(FailureKind::Transport) => f.write_str("failed (transport)"),
            ServiceState::Failed(FailureKind::Http(status)) => write!(f, "failed (http {status})"),
            ServiceState::Succeeded(Correlation::Malformed) => f.write_str("succeeded (malformed headers)"),
            ServiceState::Succeeded(Correlation::Uncorrelated) => f.write_str("succeeded (no correlation id)"),
            ServiceState::Succeeded(Correlation::Correlated(id)) => write!(f, "succeeded ({id})"),
        }
    }
}

/// Terminal state of every configured service, in configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub services: Vec<ServiceState>,
}

impl RunReport {
    pub fn pending(count: usize) -> Self {
        Self {
            services: vec![ServiceState::Pending; count],
        }
    }

    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, ServiceState::Succeeded(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ServiceState::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, ServiceState::Skipped))
    }

    pub fn is_complete(&self) -> bool {
        self.services.iter().all(ServiceState::is_terminal)
    }

    fn count(&self, pred: impl Fn(&ServiceState) -> bool) -> usize {
        self.services.iter().filter(|s| pred(s)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::pending(4);
        assert!(!report.is_complete());

        report.services[0] = ServiceState::Skipped;
        report.services[1] = ServiceState::Failed(FailureKind::Http(500));
        report.services[2] = ServiceState::Succeeded(Correlation::Correlated("id".into()));
        report.services[3] = ServiceState::Succeeded(Correlation::Malformed);

        assert!(report.is_complete());
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ServiceState::Failed(FailureKind::Http(404)).to_string(), "failed (http 404)");
        assert_eq!(
            ServiceState::Succeeded(Correlation::Correlated("id123".into())).to_string(),
            "succeeded (id123)"
        );
    }
}
