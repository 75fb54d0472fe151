//! # Battlefield Core - trace comparator
//!
//! A battlefield run drives a scripted sequence of transactions against a
//! node and records what it expects to happen in an expected-event log.
//! Node instrumentation independently produces a trace document. This crate
//! checks that the trace contains, in order, every expected action and
//! database operation.
//!
//! - **Expected log** ([`expected`]): newline-delimited JSON records, written
//!   by [`ExpectedLogWriter`] and read by [`load_expected_events`]
//! - **Trace** ([`trace`]): the nested block document, flattened by
//!   [`extract`] into ordered action and db-op sequences
//! - **Matcher** ([`matcher`]): per-kind forward-only search with wildcard
//!   and `"null"` aware field comparison
//! - **Report** ([`report`]): match/failure tally and exit status
//!
//! ## Example
//!
//! ```rust
//! use battlefield_core::{compare, parse_expected_events, TraceDocument};
//!
//! let expected = parse_expected_events(
//!     r#"{"type": "action", "trx_id": "*", "account": "battlefield1", "receiver": "battlefield1", "action_name": "dbins", "params": {"account": "battlefield1"}}"#,
//! ).unwrap();
//!
//! let document = TraceDocument::from_json(r#"[{
//!     "unfilteredTransactionTraces": [{
//!         "id": "abc123",
//!         "actionTraces": [{
//!             "receiver": "battlefield1",
//!             "action": {"account": "battlefield1", "name": "dbins", "jsonData": "{\"account\":\"battlefield1\"}"}
//!         }]
//!     }]
//! }]"#).unwrap();
//!
//! let report = compare(&expected, &document);
//! assert!(report.is_success());
//! assert_eq!(report.matched_actions, 1);
//! assert_eq!(report.exit_code(), 0);
//! ```

pub mod comparator;
pub mod config;
pub mod error;
pub mod expected;
pub mod matcher;
pub mod report;
pub mod trace;

// Re-export main types
pub use comparator::{compare, compare_observed, Comparator};
pub use config::{CompareConfig, OutputFormat};
pub use error::{CompareError, ErrorCategory, Result};
pub use expected::{
    load_expected_events, parse_expected_events, DbOpKind, EventKind, ExpectedAction,
    ExpectedDbOp, ExpectedEvent, ExpectedLogWriter, WILDCARD,
};
pub use matcher::{fields_match, find_next};
pub use report::{ComparisonReport, MatchRecord, ReportBuilder, UnknownRecord, UnmatchedEvent};
pub use trace::{extract, ObservedAction, ObservedDbOp, ObservedEvents, TraceDocument};
