//! Observed trace document
//!
//! Firehose instrumentation decodes the node's deep-mind log into a JSON
//! array of block records (protobuf JSON, camelCase keys). Only the parts
//! the comparator reads are modelled; every other key is ignored and every
//! modelled key may be absent or `null`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CompareError, Result};

/// Trx id stamped on transaction traces that carry none
pub const UNKNOWN_TRX_ID: &str = "n/a";

/// Full trace document: blocks in production order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceDocument {
    pub blocks: Vec<BlockRecord>,
}

impl TraceDocument {
    /// Parse a trace document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a trace document file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;

        let document: TraceDocument =
            serde_json::from_str(&content).map_err(|e| CompareError::MalformedTraceDocument {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            path = %path.display(),
            blocks = document.blocks.len(),
            "loaded trace document"
        );

        Ok(document)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub unfiltered_transaction_traces: Vec<TransactionTrace>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTrace {
    #[serde(default = "unknown_trx_id", deserialize_with = "null_as_unknown_trx_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action_traces: Vec<ActionTrace>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub db_ops: Vec<DbOpRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionTrace {
    #[serde(default, deserialize_with = "null_as_default")]
    pub receiver: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: ActionRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub account: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// ABI-decoded action data, still JSON-encoded
    #[serde(default, deserialize_with = "null_as_default")]
    pub json_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbOpRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_key: String,
    /// New row, JSON-encoded; empty on removal
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_data_json: String,
}

fn unknown_trx_id() -> String {
    UNKNOWN_TRX_ID.to_string()
}

fn null_as_unknown_trx_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_trx_id))
}

/// Deserialize `null` as the type's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
