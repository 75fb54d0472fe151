//! Expected event records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CompareError, Result};
use crate::trace::null_as_default;

use super::WILDCARD;

/// Kind of database mutation recorded for an expected db op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbOpKind {
    #[serde(rename = "INS")]
    Insert,
    #[serde(rename = "UPD")]
    Update,
    #[serde(rename = "REM")]
    Remove,
}

impl DbOpKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DbOpKind::Insert => "INS",
            DbOpKind::Update => "UPD",
            DbOpKind::Remove => "REM",
        }
    }
}

impl std::fmt::Display for DbOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DbOpKind {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "INS" => Ok(DbOpKind::Insert),
            "UPD" => Ok(DbOpKind::Update),
            "REM" => Ok(DbOpKind::Remove),
            _ => Err(CompareError::InvalidDbOp { op: s.to_string() }),
        }
    }
}

/// An action the scenario expects the node to have executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedAction {
    /// Owning transaction, or `*` for any transaction
    pub trx_id: String,
    /// Contract account that defines the action
    pub account: String,
    /// Account whose code ran the action (differs on notifications)
    pub receiver: String,
    pub action_name: String,
    /// Subset of the decoded action data; values may be `*`
    #[serde(default, deserialize_with = "null_as_default")]
    pub params: Map<String, Value>,
    /// Recorded for reference, not compared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retvalue: Option<Value>,
}

impl ExpectedAction {
    /// Whether this action accepts any transaction id
    pub fn any_transaction(&self) -> bool {
        self.trx_id == WILDCARD
    }
}

/// A table mutation the scenario expects the node to have performed
///
/// Only `trx_id` is required on read. A record missing an identifying key
/// loads with an empty value and simply fails to match. `op` is kept as
/// written: the comparator never looks at it, and only
/// [`ExpectedLogWriter::log_dbop`](super::ExpectedLogWriter::log_dbop)
/// validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedDbOp {
    /// Owning transaction; always compared exactly
    pub trx_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pkey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub op: String,
    /// Subset of the new row; values may be `*`
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Map<String, Value>,
}

impl ExpectedDbOp {
    /// Parsed operation code
    pub fn op_kind(&self) -> Result<DbOpKind> {
        self.op.parse()
    }
}

/// Discriminant of an [`ExpectedEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Action,
    DbOp,
}

impl EventKind {
    /// Get the string representation used in the `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Action => "action",
            EventKind::DbOp => "dbop",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One record of the expected-event file
///
/// Records with a `type` other than `action` or `dbop` are kept as
/// [`ExpectedEvent::Unknown`] so the comparator can report them instead of
/// failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ExpectedEvent {
    #[serde(rename = "action")]
    Action(ExpectedAction),
    #[serde(rename = "dbop")]
    DbOp(ExpectedDbOp),
    #[serde(skip_serializing)]
    Unknown { kind: String, trx_id: String },
}

impl ExpectedEvent {
    /// Decode a record from an already-parsed JSON value
    ///
    /// The error string names the offending field; the loader attaches the
    /// line number.
    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| "missing string field `type`".to_string())?
            .to_string();

        match kind.as_str() {
            "action" => serde_json::from_value(value)
                .map(ExpectedEvent::Action)
                .map_err(|e| e.to_string()),
            "dbop" => serde_json::from_value(value)
                .map(ExpectedEvent::DbOp)
                .map_err(|e| e.to_string()),
            _ => {
                let trx_id = value
                    .get("trx_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| "missing string field `trx_id`".to_string())?
                    .to_string();
                Ok(ExpectedEvent::Unknown { kind, trx_id })
            }
        }
    }

    /// Transaction id this record refers to
    pub fn trx_id(&self) -> &str {
        match self {
            ExpectedEvent::Action(action) => &action.trx_id,
            ExpectedEvent::DbOp(db_op) => &db_op.trx_id,
            ExpectedEvent::Unknown { trx_id, .. } => trx_id,
        }
    }

    /// Kind of the record, `None` for unknown records
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            ExpectedEvent::Action(_) => Some(EventKind::Action),
            ExpectedEvent::DbOp(_) => Some(EventKind::DbOp),
            ExpectedEvent::Unknown { .. } => None,
        }
    }

    pub fn as_action(&self) -> Option<&ExpectedAction> {
        match self {
            ExpectedEvent::Action(action) => Some(action),
            _ => None,
        }
    }

    pub fn as_db_op(&self) -> Option<&ExpectedDbOp> {
        match self {
            ExpectedEvent::DbOp(db_op) => Some(db_op),
            _ => None,
        }
    }
}
