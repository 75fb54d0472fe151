//! Expected event log writer
//!
//! Used by scenario drivers to record what they expect the node to emit.
//! Every record is validated before a single byte is written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::error::{CompareError, Result};

use super::event::{DbOpKind, ExpectedAction, ExpectedDbOp, ExpectedEvent};

/// Writes expected events as newline-delimited JSON
pub struct ExpectedLogWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl ExpectedLogWriter<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| CompareError::io(path, e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ExpectedLogWriter<W> {
    /// Wrap an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Record an expected action execution
    ///
    /// `params` must be a JSON object (or null for no constraint).
    pub fn log_action(
        &mut self,
        trx_id: &str,
        account: &str,
        receiver: &str,
        action_name: &str,
        params: Value,
        retvalue: Option<Value>,
    ) -> Result<()> {
        let params = into_fields(params, "params", action_name)?;

        self.log(&ExpectedEvent::Action(ExpectedAction {
            trx_id: trx_id.to_string(),
            account: account.to_string(),
            receiver: receiver.to_string(),
            action_name: action_name.to_string(),
            params,
            retvalue,
        }))
    }

    /// Record an expected table mutation
    ///
    /// `op` must be one of `INS`, `UPD` or `REM`; anything else is rejected
    /// before the record is written.
    #[allow(clippy::too_many_arguments)]
    pub fn log_dbop(
        &mut self,
        trx_id: &str,
        code: &str,
        scope: &str,
        table_name: &str,
        pkey: &str,
        op: &str,
        fields: Value,
    ) -> Result<()> {
        let op: DbOpKind = op.parse()?;
        let fields = into_fields(fields, "fields", table_name)?;

        self.log(&ExpectedEvent::DbOp(ExpectedDbOp {
            trx_id: trx_id.to_string(),
            code: code.to_string(),
            scope: scope.to_string(),
            table_name: table_name.to_string(),
            pkey: pkey.to_string(),
            op: op.to_string(),
            fields,
        }))
    }

    /// Write one record, stamped with the current time
    ///
    /// [`ExpectedEvent::Unknown`] records are rejected: only actions and db
    /// ops can be written.
    pub fn log(&mut self, event: &ExpectedEvent) -> Result<()> {
        if let ExpectedEvent::Unknown { kind, .. } = event {
            return Err(CompareError::UnknownEventKind { kind: kind.clone() });
        }

        let mut record = match serde_json::to_value(event)? {
            Value::Object(map) => map,
            other => {
                return Err(CompareError::InternalError {
                    reason: format!("expected event serialized to non-object {other}"),
                })
            }
        };
        record.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let line = serde_json::to_string(&record)?;
        writeln!(self.writer, "{}", line).map_err(|e| CompareError::IoError {
            path: "<expected log>".to_string(),
            message: e.to_string(),
        })?;
        self.records_written += 1;

        tracing::trace!(trx_id = event.trx_id(), "expected event recorded");
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush buffered records to the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| CompareError::IoError {
            path: "<expected log>".to_string(),
            message: e.to_string(),
        })
    }

    /// Consume the log writer and return the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn into_fields(value: Value, field: &str, name: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(CompareError::InvalidFields {
            field: field.to_string(),
            name: name.to_string(),
        }),
    }
}
