//! Proxy timing header parsing.
//!
//! The downstream proxy injects two headers on every response it serves:
//!
//! ```text
//! X-Performance-Tuning-StartLog: svcA|id123|op - start|2024-01-01|10:00:00.000
//! X-Performance-Tuning-EndLog:   svcA|id123|op - end|2024-01-01|10:00:00.180
//! ```
//!
//! Each value has exactly five `|`-delimited segments: service name,
//! correlation id, operation label with a phase marker, date, time.

use thiserror::Error;

use crate::correlation::entry::{CorrelatedLogEntry, LogSource, Phase};

pub const START_LOG_HEADER: &str = "X-Performance-Tuning-StartLog";
pub const END_LOG_HEADER: &str = "X-Performance-Tuning-EndLog";

/// Errors raised while parsing a proxy timing header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("expected 5 '|'-delimited segments, found {found}")]
    SegmentCount { found: usize },

    #[error("empty {field} segment")]
    EmptySegment { field: &'static str },

    #[error("operation label '{label}' has no '{}' marker", .expected.marker())]
    MissingPhaseMarker { expected: Phase, label: String },
}

impl ParseError {
    /// Header name for a given phase.
    pub fn header_name(phase: Phase) -> &'static str {
        match phase {
            Phase::Start => START_LOG_HEADER,
            Phase::End => END_LOG_HEADER,
        }
    }
}

/// Proxy-side timing record for one phase of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceHeaderRecord {
    pub service_name: String,
    /// Trimmed; empty when the proxy did not assign one.
    pub correlation_id: String,
    /// Operation label with the phase marker stripped.
    pub operation: String,
    pub phase: Phase,
    pub date: String,
    pub time: String,
}

impl PerformanceHeaderRecord {
    pub fn has_correlation_id(&self) -> bool {
        !self.correlation_id.is_empty()
    }

    pub fn to_entry(&self) -> CorrelatedLogEntry {
        CorrelatedLogEntry {
            source: LogSource::Proxy(self.service_name.clone()),
            correlation_id: self.correlation_id.clone(),
            operation: self.operation.clone(),
            phase: self.phase,
            timestamp: format!("{}|{}", self.date, self.time),
        }
    }
}

/// Parse a raw header value, expecting the marker for `phase`.
pub fn parse(raw: &str, phase: Phase) -> Result<PerformanceHeaderRecord, ParseError> {
    let segments: Vec<&str> = raw.split('|').collect();
    let &[service_name, correlation_id, label, date, time] = segments.as_slice() else {
        return Err(ParseError::SegmentCount { found: segments.len() });
    };

    let service_name = required(service_name, "service name")?;
    let date = required(date, "date")?;
    let time = required(time, "time")?;

    let label = label.trim();
    let operation = match label.find(phase.marker()) {
        Some(end) => required(&label[..end], "operation")?,
        None => {
            return Err(ParseError::MissingPhaseMarker {
                expected: phase,
                label: label.to_string(),
            })
        }
    };

    Ok(PerformanceHeaderRecord {
        service_name,
        correlation_id: correlation_id.trim().to_string(),
        operation,
        phase,
        date,
        time,
    })
}

/// Parse an optional header value; an absent header is a `MissingHeader` error.
pub fn parse_header(raw: Option<&str>, phase: Phase) -> Result<PerformanceHeaderRecord, ParseError> {
    let raw = raw.ok_or(ParseError::MissingHeader(ParseError::header_name(phase)))?;
    parse(raw, phase)
}

fn required(segment: &str, field: &'static str) -> Result<String, ParseError> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptySegment { field });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_header() {
        let record = parse("svcA|id123|op - start|2024-01-01|10:00:00.000", Phase::Start).unwrap();
        assert_eq!(record.service_name, "svcA");
        assert_eq!(record.correlation_id, "id123");
        assert_eq!(record.operation, "op");
        assert_eq!(record.date, "2024-01-01");
        assert_eq!(record.time, "10:00:00.000");
        assert_eq!(
            record.to_entry().to_string(),
            "svcA | id123 | [] INFO |op| start |2024-01-01|10:00:00.000"
        );
    }

    #[test]
    fn test_parse_padded_end_header() {
        let raw = "billing-proxy |  7f3a  | Create Invoice - end |2024-03-05| 09:12:44.918";
        let record = parse(raw, Phase::End).unwrap();
        assert_eq!(record.correlation_id, "7f3a");
        assert_eq!(record.operation, "Create Invoice");
        assert_eq!(
            record.to_entry().to_string(),
            "billing-proxy | 7f3a | [] INFO |Create Invoice| end |2024-03-05|09:12:44.918"
        );
    }

    #[test]
    fn test_too_few_segments() {
        let err = parse("svcA|id123|op - start", Phase::Start).unwrap_err();
        assert_eq!(err, ParseError::SegmentCount { found: 3 });

        let err = parse("", Phase::Start).unwrap_err();
        assert_eq!(err, ParseError::SegmentCount { found: 1 });
    }

    #[test]
    fn test_too_many_segments() {
        let err = parse("a|b|op - end|d|e|f", Phase::End).unwrap_err();
        assert_eq!(err, ParseError::SegmentCount { found: 6 });
    }

    #[test]
    fn test_empty_correlation_id_is_not_an_error() {
        let record = parse("svcA|   |op - start|2024-01-01|10:00:00.000", Phase::Start).unwrap();
        assert!(!record.has_correlation_id());
    }

    #[test]
    fn test_wrong_phase_marker() {
        let err = parse("svcA|id|op - end|2024-01-01|10:00:00.000", Phase::Start).unwrap_err();
        assert!(matches!(err, ParseError::MissingPhaseMarker { expected: Phase::Start, .. }));
        assert_eq!(err.to_string(), "operation label 'op - end' has no '- start' marker");
    }

    #[test]
    fn test_empty_required_segment() {
        let err = parse(" |id|op - start|2024-01-01|10:00:00.000", Phase::Start).unwrap_err();
        assert_eq!(err, ParseError::EmptySegment { field: "service name" });

        let err = parse("svcA|id| - start|2024-01-01|10:00:00.000", Phase::Start).unwrap_err();
        assert_eq!(err, ParseError::EmptySegment { field: "operation" });
    }

    #[test]
    fn test_missing_header() {
        let err = parse_header(None, Phase::End).unwrap_err();
        assert_eq!(err, ParseError::MissingHeader(END_LOG_HEADER));
    }
}
