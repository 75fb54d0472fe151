//! Sequential Matcher - forward-only search per event kind
//!
//! Each pass keeps a cursor into its observed sequence. A match at index `i`
//! moves the cursor to `i + 1`; a miss is reported and leaves the cursor
//! where it was. Expected events of one kind must therefore appear in the
//! same relative order in the trace, with any amount of noise in between.

use crate::expected::{ExpectedAction, ExpectedDbOp, ExpectedEvent};
use crate::report::{ReportBuilder, UnmatchedEvent};
use crate::trace::{ObservedAction, ObservedDbOp};

use super::fields::fields_match;

/// First index at or after `from` whose element satisfies `predicate`
pub fn find_next<T>(
    observed: &[T],
    from: usize,
    mut predicate: impl FnMut(&T) -> bool,
) -> Option<usize> {
    observed
        .get(from..)?
        .iter()
        .position(|candidate| predicate(candidate))
        .map(|offset| from + offset)
}

/// Whether an observed action satisfies an expected action
///
/// The expected trx id may be `*`.
pub fn action_matches(expected: &ExpectedAction, observed: &ObservedAction) -> bool {
    (expected.any_transaction() || observed.trx_id == expected.trx_id)
        && observed.receiver == expected.receiver
        && observed.account == expected.account
        && observed.action_name == expected.action_name
        && fields_match(&expected.params, &observed.json_data)
}

/// Whether an observed db op satisfies an expected db op
///
/// The trx id is always compared exactly: `*` is not honoured for db ops.
/// The op kind is not compared.
pub fn db_op_matches(expected: &ExpectedDbOp, observed: &ObservedDbOp) -> bool {
    observed.trx_id == expected.trx_id
        && observed.code == expected.code
        && observed.scope == expected.scope
        && observed.table_name == expected.table_name
        && observed.primary_key == expected.pkey
        && fields_match(&expected.fields, &observed.new_data_json)
}

pub fn find_action(
    expected: &ExpectedAction,
    observed: &[ObservedAction],
    from: usize,
) -> Option<usize> {
    find_next(observed, from, |candidate| action_matches(expected, candidate))
}

pub fn find_db_op(expected: &ExpectedDbOp, observed: &[ObservedDbOp], from: usize) -> Option<usize> {
    find_next(observed, from, |candidate| db_op_matches(expected, candidate))
}

/// Match every expected action against the observed actions
///
/// Unknown record kinds are reported here, once per comparison.
pub fn match_actions(
    expected: &[ExpectedEvent],
    observed: &[ObservedAction],
    report: &mut ReportBuilder,
) {
    let mut cursor = 0;

    for (index, event) in expected.iter().enumerate() {
        match event {
            ExpectedEvent::Action(action) => match find_action(action, observed, cursor) {
                Some(found) => {
                    tracing::debug!(
                        expected = index,
                        observed = found,
                        account = %action.account,
                        action = %action.action_name,
                        "action matched"
                    );
                    report.record_action_match(index, found);
                    cursor = found + 1;
                }
                None => report.record_failure(UnmatchedEvent::Action {
                    expected_index: index,
                    trx_id: action.trx_id.clone(),
                    account: action.account.clone(),
                    action_name: action.action_name.clone(),
                }),
            },
            ExpectedEvent::Unknown { kind, trx_id } => {
                tracing::warn!(
                    expected = index,
                    "Invalid record type: {} for trx_id {}",
                    kind,
                    trx_id
                );
                report.record_unknown(index, kind, trx_id);
            }
            ExpectedEvent::DbOp(_) => {}
        }
    }
}

/// Match every expected db op against the observed db ops
pub fn match_db_ops(expected: &[ExpectedEvent], observed: &[ObservedDbOp], report: &mut ReportBuilder) {
    let mut cursor = 0;

    for (index, db_op) in expected
        .iter()
        .enumerate()
        .filter_map(|(index, event)| event.as_db_op().map(|db_op| (index, db_op)))
    {
        match find_db_op(db_op, observed, cursor) {
            Some(found) => {
                tracing::debug!(
                    expected = index,
                    observed = found,
                    code = %db_op.code,
                    table = %db_op.table_name,
                    "db op matched"
                );
                report.record_db_op_match(index, found);
                cursor = found + 1;
            }
            None => report.record_failure(UnmatchedEvent::DbOp {
                expected_index: index,
                trx_id: db_op.trx_id.clone(),
                code: db_op.code.clone(),
                table_name: db_op.table_name.clone(),
                pkey: db_op.pkey.clone(),
            }),
        }
    }
}
