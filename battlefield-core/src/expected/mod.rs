//! Expected event log
//!
//! The battlefield scenario records every action and table mutation it
//! expects the node to produce as newline-delimited JSON, one record per
//! line. This module reads that file ([`parse_expected_events`],
//! [`load_expected_events`]) and writes it ([`ExpectedLogWriter`]).
//!
//! ```text
//! {"timestamp": "...", "type": "action", "trx_id": "...", "account": "...", "receiver": "...", "action_name": "...", "params": {...}}
//! {"timestamp": "...", "type": "dbop", "trx_id": "...", "code": "...", "scope": "...", "table_name": "...", "pkey": "...", "op": "INS", "fields": {...}}
//! ```

mod event;
mod writer;

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{CompareError, Result};

pub use event::{DbOpKind, EventKind, ExpectedAction, ExpectedDbOp, ExpectedEvent};
pub use writer::ExpectedLogWriter;

/// Sentinel accepted in place of a trx id or a field value
pub const WILDCARD: &str = "*";

/// Parse the content of an expected-event file
///
/// Blank lines are skipped. The first malformed line aborts the parse with
/// its 1-based line number.
pub fn parse_expected_events(input: &str) -> Result<Vec<ExpectedEvent>> {
    let mut events = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = index + 1;
        let value: Value = serde_json::from_str(line).map_err(|e| {
            CompareError::MalformedExpectedEvent {
                line: line_number,
                reason: e.to_string(),
            }
        })?;

        let event = ExpectedEvent::from_value(value).map_err(|reason| {
            CompareError::MalformedExpectedEvent {
                line: line_number,
                reason,
            }
        })?;
        events.push(event);
    }

    Ok(events)
}

/// Read and parse an expected-event file
pub fn load_expected_events(path: impl AsRef<Path>) -> Result<Vec<ExpectedEvent>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;
    let events = parse_expected_events(&content)?;

    tracing::debug!(
        path = %path.display(),
        records = events.len(),
        "loaded expected events"
    );

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: &str = r#"{"type": "action", "trx_id": "t1", "account": "battlefield1", "receiver": "battlefield1", "action_name": "dbins", "params": {"account": "battlefield1"}, "retvalue": ""}
{"type": "dbop", "trx_id": "t1", "code": "battlefield1", "scope": "battlefield1", "table_name": "member", "pkey": "............1", "op": "INS", "fields": {"id": 1, "created_at": "*"}}

{"type": "permop", "trx_id": "t1"}
"#;

    #[test]
    fn test_parse_keeps_file_order() {
        let events = parse_expected_events(EXPECTED).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind(), Some(EventKind::Action));
        assert_eq!(events[1].kind(), Some(EventKind::DbOp));
        assert_eq!(events[2].kind(), None);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "{\"type\": \"action\", \"trx_id\": \"*\", \"account\": \"a\", \"receiver\": \"a\", \"action_name\": \"x\", \"params\": {}}\n{not json\n";
        let err = parse_expected_events(input).unwrap_err();

        match err {
            CompareError::MalformedExpectedEvent { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let input = r#"{"type": "action", "trx_id": "t1", "receiver": "a", "action_name": "x"}"#;
        let err = parse_expected_events(input).unwrap_err();

        assert_eq!(err.error_code(), "MALFORMED_EXPECTED_EVENT");
        assert!(err.to_string().contains("account"));
    }

    #[test]
    fn test_odd_db_op_lines_still_load() {
        let input = r#"{"type": "action", "trx_id": "t1", "account": "a", "receiver": "a", "action_name": "x", "params": {}}
{"type": "dbop", "trx_id": "t1", "code": "a", "scope": "a", "table_name": "t", "pkey": "1", "op": "DEL", "fields": {}}
{"type": "dbop", "trx_id": "t1", "table_name": "t"}"#;
        let events = parse_expected_events(input).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[1].as_db_op().unwrap().op, "DEL");
        assert_eq!(events[2].as_db_op().unwrap().pkey, "");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_expected_events("/nonexistent/expected.jsonl").unwrap_err();
        assert!(matches!(err, CompareError::IoError { .. }));
    }
}
