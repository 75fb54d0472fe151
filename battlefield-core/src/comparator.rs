//! Comparator facade
//!
//! Ties the pieces together: load both inputs, flatten the trace, run the
//! action pass then the db-op pass, and hand back the report.
//!
//! ```text
//! expected.jsonl ──► [ExpectedEvent] ─────────────┐
//!                                                 ├─► match_actions ─┐
//! dm.log.json ──► TraceDocument ──► extract() ────┤                  ├─► ComparisonReport
//!                                                 └─► match_db_ops ──┘
//! ```

use crate::config::CompareConfig;
use crate::error::Result;
use crate::expected::{load_expected_events, ExpectedEvent};
use crate::matcher::{match_actions, match_db_ops};
use crate::report::{ComparisonReport, ReportBuilder};
use crate::trace::{extract, ObservedEvents, TraceDocument};

/// Runs a comparison described by a [`CompareConfig`]
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Load both files and compare them
    ///
    /// Fails only on unreadable or malformed input; unmatched events end up
    /// in the returned report.
    pub fn run(&self) -> Result<ComparisonReport> {
        let expected = load_expected_events(&self.config.expected_path)?;
        let document = TraceDocument::load(&self.config.trace_path)?;

        tracing::info!(
            expected = expected.len(),
            blocks = document.blocks.len(),
            "comparing expected events against trace"
        );

        Ok(compare(&expected, &document))
    }
}

/// Compare expected events against a parsed trace document
pub fn compare(expected: &[ExpectedEvent], document: &TraceDocument) -> ComparisonReport {
    compare_observed(expected, &extract(document))
}

/// Compare expected events against already-flattened observed events
pub fn compare_observed(expected: &[ExpectedEvent], observed: &ObservedEvents) -> ComparisonReport {
    let mut builder = ReportBuilder::new();

    match_actions(expected, &observed.actions, &mut builder);
    match_db_ops(expected, &observed.db_ops, &mut builder);

    let report = builder.build();
    tracing::info!(
        matched_actions = report.matched_actions,
        matched_db_ops = report.matched_db_ops,
        failed = report.failed(),
        "comparison finished"
    );
    report
}
