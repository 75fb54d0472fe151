//! Flattening of a trace document into per-kind event sequences

use serde::{Deserialize, Serialize};

use super::document::TraceDocument;

/// One executed action, stamped with its transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedAction {
    pub trx_id: String,
    pub receiver: String,
    pub account: String,
    pub action_name: String,
    pub json_data: String,
}

/// One table mutation, stamped with its transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedDbOp {
    pub trx_id: String,
    pub code: String,
    pub scope: String,
    pub table_name: String,
    pub primary_key: String,
    pub new_data_json: String,
}

/// Both observed sequences, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedEvents {
    pub actions: Vec<ObservedAction>,
    pub db_ops: Vec<ObservedDbOp>,
}

impl ObservedEvents {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.db_ops.is_empty()
    }
}

/// Flatten blocks → transactions → action traces / db ops
///
/// Order is blocks, then transactions within a block, then entries within a
/// transaction. Nothing is filtered out.
pub fn extract(document: &TraceDocument) -> ObservedEvents {
    let mut observed = ObservedEvents::default();

    for block in &document.blocks {
        for trx in &block.unfiltered_transaction_traces {
            observed
                .actions
                .extend(trx.action_traces.iter().map(|trace| ObservedAction {
                    trx_id: trx.id.clone(),
                    receiver: trace.receiver.clone(),
                    account: trace.action.account.clone(),
                    action_name: trace.action.name.clone(),
                    json_data: trace.action.json_data.clone(),
                }));

            observed
                .db_ops
                .extend(trx.db_ops.iter().map(|op| ObservedDbOp {
                    trx_id: trx.id.clone(),
                    code: op.code.clone(),
                    scope: op.scope.clone(),
                    table_name: op.table_name.clone(),
                    primary_key: op.primary_key.clone(),
                    new_data_json: op.new_data_json.clone(),
                }));
        }
    }

    tracing::debug!(
        actions = observed.actions.len(),
        db_ops = observed.db_ops.len(),
        "extracted observed events"
    );

    observed
}
