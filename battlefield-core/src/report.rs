//! Comparison report
//!
//! Collects the outcome of both matching passes. A report with failures is
//! still a successful *comparison*: the caller decides what to do with it,
//! usually printing [`ComparisonReport::render_text`] and exiting with
//! [`ComparisonReport::exit_code`].

use serde::{Deserialize, Serialize};

use crate::expected::EventKind;

/// An expected event that consumed an observed event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub kind: EventKind,
    /// Position in the expected-event file (records, not lines)
    pub expected_index: usize,
    /// Position in the observed sequence of the same kind
    pub observed_index: usize,
}

/// An expected event with no counterpart in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnmatchedEvent {
    Action {
        expected_index: usize,
        trx_id: String,
        account: String,
        action_name: String,
    },
    DbOp {
        expected_index: usize,
        trx_id: String,
        code: String,
        table_name: String,
        pkey: String,
    },
}

impl UnmatchedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UnmatchedEvent::Action { .. } => EventKind::Action,
            UnmatchedEvent::DbOp { .. } => EventKind::DbOp,
        }
    }

    pub fn trx_id(&self) -> &str {
        match self {
            UnmatchedEvent::Action { trx_id, .. } | UnmatchedEvent::DbOp { trx_id, .. } => trx_id,
        }
    }

    pub fn expected_index(&self) -> usize {
        match self {
            UnmatchedEvent::Action { expected_index, .. }
            | UnmatchedEvent::DbOp { expected_index, .. } => *expected_index,
        }
    }
}

impl std::fmt::Display for UnmatchedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnmatchedEvent::Action {
                trx_id,
                account,
                action_name,
                ..
            } => write!(f, "No action found for {}:{} @ trx {}", account, action_name, trx_id),
            UnmatchedEvent::DbOp {
                trx_id,
                code,
                table_name,
                ..
            } => write!(
                f,
                "No matching dbop found for table update {}:{} @ trx {}",
                code, table_name, trx_id
            ),
        }
    }
}

/// An expected record whose `type` is neither `action` nor `dbop`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownRecord {
    pub expected_index: usize,
    pub kind: String,
    pub trx_id: String,
}

impl std::fmt::Display for UnknownRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid record type: {} for trx_id {}", self.kind, self.trx_id)
    }
}

/// Outcome of comparing an expected-event log with a trace document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub matched_actions: usize,
    pub matched_db_ops: usize,
    /// Records whose `type` was neither `action` nor `dbop`; not failures
    pub unknown_records: Vec<UnknownRecord>,
    /// Successful matches, action pass first
    pub matches: Vec<MatchRecord>,
    /// Unmatched expected events, action pass first
    pub failures: Vec<UnmatchedEvent>,
}

impl ComparisonReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total_matched(&self) -> usize {
        self.matched_actions + self.matched_db_ops
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Process exit status: 0 when everything matched, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Final tally line
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!(
                "Validated {} actions and {} db_ops successfully",
                self.matched_actions, self.matched_db_ops
            )
        } else {
            format!(
                "Failed {} out of {} actions and db_ops - see above",
                self.failed(),
                self.total_matched()
            )
        }
    }

    /// One line per unknown record, then one per failure, then the tally
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for unknown in &self.unknown_records {
            out.push_str(&unknown.to_string());
            out.push('\n');
        }
        for failure in &self.failures {
            out.push_str(&failure.to_string());
            out.push('\n');
        }
        out.push_str(&self.summary());
        out.push('\n');
        out
    }
}

/// Accumulates match results while the passes run
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: ComparisonReport,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_action_match(&mut self, expected_index: usize, observed_index: usize) {
        self.report.matched_actions += 1;
        self.report.matches.push(MatchRecord {
            kind: EventKind::Action,
            expected_index,
            observed_index,
        });
    }

    pub fn record_db_op_match(&mut self, expected_index: usize, observed_index: usize) {
        self.report.matched_db_ops += 1;
        self.report.matches.push(MatchRecord {
            kind: EventKind::DbOp,
            expected_index,
            observed_index,
        });
    }

    pub fn record_failure(&mut self, failure: UnmatchedEvent) {
        tracing::debug!(
            kind = %failure.kind(),
            expected = failure.expected_index(),
            trx_id = failure.trx_id(),
            "expected event not found"
        );
        self.report.failures.push(failure);
    }

    pub fn record_unknown(&mut self, expected_index: usize, kind: &str, trx_id: &str) {
        self.report.unknown_records.push(UnknownRecord {
            expected_index,
            kind: kind.to_string(),
            trx_id: trx_id.to_string(),
        });
    }

    pub fn build(self) -> ComparisonReport {
        self.report
    }
}
