//! Client-side timing of outbound calls.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::correlation::entry::{CorrelatedLogEntry, Phase};

/// `YYYY-MM-DD|HH:MM:SS.mmm`, matching the date/time segments of proxy headers.
pub const CLIENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d|%H:%M:%S%.3f";

/// Start and end instants of one outbound call. `end >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingWindow {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl TimingWindow {
    /// Build a window from two wall-clock instants; an `end` before `start` is clamped.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self { start, end: end.max(start) }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        (self.end - self.start).to_std().unwrap_or_default()
    }
}

/// Captures the instants around a single call.
///
/// The wall-clock start is taken once; the end is derived from a monotonic
/// clock so a system clock step during the call cannot shrink the window.
#[derive(Debug)]
pub struct TimingRecorder {
    wall_start: DateTime<Local>,
    started: Instant,
}

impl TimingRecorder {
    pub fn start() -> Self {
        Self {
            wall_start: Local::now(),
            started: Instant::now(),
        }
    }

    pub fn finish(self) -> TimingWindow {
        let elapsed = chrono::Duration::from_std(self.started.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        TimingWindow::new(self.wall_start, self.wall_start + elapsed)
    }
}

/// Client start/end entries for a window.
pub fn client_entries(correlation_id: &str, window: &TimingWindow) -> [CorrelatedLogEntry; 2] {
    [
        CorrelatedLogEntry::client(
            correlation_id,
            Phase::Start,
            window.start().format(CLIENT_TIMESTAMP_FORMAT).to_string(),
        ),
        CorrelatedLogEntry::client(
            correlation_id,
            Phase::End,
            window.end().format(CLIENT_TIMESTAMP_FORMAT).to_string(),
        ),
    ]
}

/// Render the client start and end lines for a window.
pub fn format_client_log(correlation_id: &str, window: &TimingWindow) -> (String, String) {
    let [start, end] = client_entries(correlation_id, window);
    (start.to_string(), end.to_string())
}
