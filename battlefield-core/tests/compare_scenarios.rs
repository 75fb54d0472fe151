//! End-to-end comparison scenarios
//!
//! Each test builds a small expected log and trace document the way a
//! battlefield run would produce them, then checks the report.

use battlefield_core::{compare, parse_expected_events, TraceDocument, UnmatchedEvent};
use serde_json::{json, Value};

fn action_trace(receiver: &str, account: &str, name: &str, data: Value) -> Value {
    json!({
        "receiver": receiver,
        "action": {
            "account": account,
            "name": name,
            "jsonData": data.to_string()
        }
    })
}

fn db_op(code: &str, table: &str, pkey: &str, data: Value) -> Value {
    json!({
        "operation": "OPERATION_INSERT",
        "code": code,
        "scope": code,
        "tableName": table,
        "primaryKey": pkey,
        "newDataJson": data.to_string()
    })
}

fn document(transactions: Vec<Value>) -> TraceDocument {
    serde_json::from_value(json!([{ "unfilteredTransactionTraces": transactions }])).unwrap()
}

fn expected(lines: &[Value]) -> Vec<battlefield_core::ExpectedEvent> {
    let text: Vec<String> = lines.iter().map(Value::to_string).collect();
    parse_expected_events(&text.join("\n")).unwrap()
}

/// One expected action, one matching trace
#[test]
fn test_single_action_matches() {
    let expected = expected(&[json!({
        "type": "action",
        "trx_id": "t1",
        "account": "battlefield1",
        "receiver": "battlefield1",
        "action_name": "dbins",
        "params": {"account": "battlefield1"}
    })]);
    let document = document(vec![json!({
        "id": "t1",
        "actionTraces": [action_trace("battlefield1", "battlefield1", "dbins", json!({"account": "battlefield1"}))]
    })]);

    let report = compare(&expected, &document);

    assert_eq!(report.matched_actions, 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.summary(), "Validated 1 actions and 0 db_ops successfully");
}

/// Primary key mismatch is reported with table and trx id
#[test]
fn test_db_op_primary_key_mismatch() {
    let expected = expected(&[json!({
        "type": "dbop",
        "trx_id": "t1",
        "code": "battlefield1",
        "scope": "battlefield1",
        "table_name": "member",
        "pkey": "5",
        "op": "INS",
        "fields": {}
    })]);
    let document = document(vec![json!({
        "id": "t1",
        "dbOps": [db_op("battlefield1", "member", "6", json!({"id": 6}))]
    })]);

    let report = compare(&expected, &document);

    assert_eq!(report.failed(), 1);
    assert_eq!(report.exit_code(), 1);
    let line = report.failures[0].to_string();
    assert!(line.contains("member"));
    assert!(line.contains("@ trx t1"));
    assert!(report.render_text().contains("Failed 1 out of 0"));
}

/// Two identical expectations, one observation: the second search starts
/// past the first match and finds nothing
#[test]
fn test_repeated_action_consumed_once() {
    let dtrx = json!({
        "type": "action",
        "trx_id": "*",
        "account": "battlefield1",
        "receiver": "battlefield1",
        "action_name": "dtrx",
        "params": {"account": "battlefield1"}
    });
    let expected = expected(&[dtrx.clone(), dtrx]);
    let document = document(vec![json!({
        "id": "d1",
        "actionTraces": [
            action_trace("eosio", "eosio", "onblock", json!({})),
            action_trace("battlefield1", "battlefield1", "dtrx", json!({"account": "battlefield1", "delay_sec": 1}))
        ]
    })]);

    let report = compare(&expected, &document);

    assert_eq!(report.matched_actions, 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.matches[0].observed_index, 1);
    assert_eq!(report.failures[0].expected_index(), 1);
}

/// Wildcard trx id matches whatever transaction carried the action
#[test]
fn test_wildcard_trx_id_action() {
    let expected = expected(&[json!({
        "type": "action",
        "trx_id": "*",
        "account": "eosio.token",
        "receiver": "battlefield1",
        "action_name": "transfer",
        "params": {"from": "eosio", "to": "battlefield1", "quantity": "*"}
    })]);
    let document = document(vec![json!({
        "id": "abc123def456",
        "actionTraces": [
            action_trace("eosio.token", "eosio.token", "transfer",
                json!({"from": "eosio", "to": "battlefield1", "quantity": "1.0000 EOS", "memo": ""})),
            action_trace("battlefield1", "eosio.token", "transfer",
                json!({"from": "eosio", "to": "battlefield1", "quantity": "1.0000 EOS", "memo": ""}))
        ]
    })]);

    let report = compare(&expected, &document);

    assert!(report.is_success());
    assert_eq!(report.matches[0].observed_index, 1);
}

/// Noise between matches is skipped; a failure in one pass leaves the
/// other pass untouched
#[test]
fn test_full_battlefield_sequence() {
    let expected = expected(&[
        json!({"type": "action", "trx_id": "t1", "account": "battlefield1", "receiver": "battlefield1", "action_name": "dbins", "params": {"account": "battlefield1"}}),
        json!({"type": "dbop", "trx_id": "t1", "code": "battlefield1", "scope": "battlefield1", "table_name": "member", "pkey": "............1", "op": "INS",
               "fields": {"account": "dbops1", "created_at": "*", "id": 1, "memo": "inserted billed to calling account"}}),
        json!({"type": "dbop", "trx_id": "t1", "code": "battlefield1", "scope": "battlefield1", "table_name": "member", "pkey": "............2", "op": "INS",
               "fields": {"account": "dbops2", "created_at": "*", "id": 2}}),
        json!({"type": "action", "trx_id": "t2", "account": "battlefield1", "receiver": "battlefield1", "action_name": "dbupd", "params": {"account": "battlefield2"}}),
        json!({"type": "action", "trx_id": "t3", "account": "battlefield1", "receiver": "battlefield1", "action_name": "dbrem", "params": {"account": "battlefield1"}}),
        json!({"type": "dbop", "trx_id": "t3", "code": "battlefield1", "scope": "battlefield1", "table_name": "member", "pkey": "............1", "op": "REM", "fields": {}}),
        json!({"type": "permop", "trx_id": "t3"}),
    ]);

    let document: TraceDocument = serde_json::from_value(json!([
        {"unfilteredTransactionTraces": [
            {"id": "onblock-1", "actionTraces": [action_trace("eosio", "eosio", "onblock", json!({}))]},
            {"id": "t1",
             "actionTraces": [action_trace("battlefield1", "battlefield1", "dbins", json!({"account": "battlefield1"}))],
             "dbOps": [
                db_op("eosio", "userres", "battlefield1", json!({"owner": "battlefield1"})),
                db_op("battlefield1", "member", "............1",
                    json!({"account": "dbops1", "amount": "0 ", "created_at": "2024-01-01T00:00:00", "expires_at": "1970-01-01T00:00:00", "id": 1, "memo": "inserted billed to calling account"})),
                db_op("battlefield1", "member", "............2",
                    json!({"account": "dbops2", "amount": "0 ", "created_at": "2024-01-01T00:00:00", "expires_at": "1970-01-01T00:00:00", "id": 2, "memo": "inserted billed to self"}))
             ]}
        ]},
        {"unfilteredTransactionTraces": [
            {"id": "t2", "actionTraces": [action_trace("battlefield1", "battlefield1", "dbupd", json!({"account": "battlefield3"}))]},
            {"id": "t3",
             "actionTraces": [action_trace("battlefield1", "battlefield1", "dbrem", json!({"account": "battlefield1"}))],
             "dbOps": [{"operation": "OPERATION_REMOVE", "code": "battlefield1", "scope": "battlefield1", "tableName": "member", "primaryKey": "............1", "newDataJson": ""}]}
        ]}
    ]))
    .unwrap();

    let report = compare(&expected, &document);

    assert_eq!(report.matched_actions, 2);
    assert_eq!(report.matched_db_ops, 3);
    assert_eq!(report.unknown_records.len(), 1);
    assert_eq!(report.unknown_records[0].trx_id, "t3");
    assert!(report
        .render_text()
        .starts_with("Invalid record type: permop for trx_id t3\n"));
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        &report.failures[0],
        UnmatchedEvent::Action { action_name, trx_id, .. } if action_name == "dbupd" && trx_id == "t2"
    ));
    assert_eq!(
        report.failures[0].to_string(),
        "No action found for battlefield1:dbupd @ trx t2"
    );
    assert_eq!(report.exit_code(), 1);
}

/// A db-op record with an unrecognised op code or missing keys is matched
/// like any other record; it never aborts the comparison
#[test]
fn test_odd_db_op_records_do_not_abort_comparison() {
    let expected = expected(&[
        json!({"type": "action", "trx_id": "t1", "account": "battlefield1", "receiver": "battlefield1", "action_name": "dbins", "params": {}}),
        json!({"type": "dbop", "trx_id": "t1", "code": "battlefield1", "scope": "battlefield1", "table_name": "member", "pkey": "1", "op": "DEL", "fields": {"id": 1}}),
        json!({"type": "dbop", "trx_id": "t1", "scope": "battlefield1", "table_name": "member", "op": "DEL"}),
        json!({"type": "dbop", "trx_id": "t1", "code": "battlefield1", "scope": "battlefield1", "table_name": "member", "pkey": "2", "fields": {"id": 2}}),
    ]);
    let document = document(vec![json!({
        "id": "t1",
        "actionTraces": [action_trace("battlefield1", "battlefield1", "dbins", json!({"account": "battlefield1"}))],
        "dbOps": [
            db_op("battlefield1", "member", "1", json!({"id": 1})),
            db_op("battlefield1", "member", "2", json!({"id": 2}))
        ]
    })]);

    let report = compare(&expected, &document);

    assert_eq!(report.matched_actions, 1);
    assert_eq!(report.matched_db_ops, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].expected_index(), 2);
    assert_eq!(
        report.failures[0].to_string(),
        "No matching dbop found for table update :member @ trx t1"
    );
}
