//! Error types for comparator operations
//!
//! Only fatal conditions are errors here. Unreadable files and malformed
//! JSON abort a comparison before matching starts; the log writer rejects
//! invalid records before writing them.
//! An expected event that cannot be found in the trace is *not* an error;
//! it is recorded in the [`ComparisonReport`](crate::report::ComparisonReport).
//!
//! # Example
//!
//! ```rust
//! use battlefield_core::error::{CompareError, ErrorCategory};
//!
//! let err = CompareError::InvalidDbOp { op: "DEL".to_string() };
//! assert_eq!(err.category(), ErrorCategory::Validation);
//! assert_eq!(err.error_code(), "INVALID_DB_OP");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for comparator operations
pub type Result<T> = std::result::Result<T, CompareError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input file content could not be understood
    Input,
    /// A record was rejected before being written or used
    Validation,
    /// Filesystem failure
    Io,
    /// Internal error that shouldn't happen
    Internal,
}

/// Errors that can occur while loading, writing or comparing event logs
#[derive(Error, Debug)]
pub enum CompareError {
    // ═══════════════════════════════════════════════════════════════════════
    // Expected-event file
    // ═══════════════════════════════════════════════════════════════════════

    /// A line of the expected-event file is not valid JSON or lacks a field
    #[error("Malformed expected event at line {line}: {reason}")]
    MalformedExpectedEvent { line: usize, reason: String },

    /// Database operation code outside INS, UPD, REM
    #[error("Invalid operation: {op}. Operation must be one of 'INS', 'UPD', or 'REM'")]
    InvalidDbOp { op: String },

    /// Params or fields given to the log writer are not a JSON object
    #[error("Invalid {field} for '{name}': expected a JSON object or null")]
    InvalidFields { field: String, name: String },

    /// Only `action` and `dbop` records can be written
    #[error("Cannot write record of type '{kind}': only 'action' and 'dbop' are supported")]
    UnknownEventKind { kind: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Observed trace document
    // ═══════════════════════════════════════════════════════════════════════

    /// The trace document is not a JSON array of block records
    #[error("Malformed trace document '{path}': {reason}")]
    MalformedTraceDocument { path: String, reason: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Infrastructure errors (serialization, I/O)
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O operation failed
    #[error("IO error on '{path}': {message}")]
    IoError { path: String, message: String },

    /// Internal error that shouldn't happen
    #[error("Internal error: {reason}. This is a bug; please report it.")]
    InternalError { reason: String },
}

impl CompareError {
    /// Build an [`CompareError::IoError`] for `path`
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        CompareError::IoError {
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }

    /// Returns true if retrying the same operation might succeed
    ///
    /// Only I/O failures qualify; malformed content stays malformed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CompareError::IoError { .. })
    }

    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            CompareError::MalformedExpectedEvent { .. }
            | CompareError::MalformedTraceDocument { .. }
            | CompareError::JsonError(_) => ErrorCategory::Input,

            CompareError::InvalidDbOp { .. }
            | CompareError::InvalidFields { .. }
            | CompareError::UnknownEventKind { .. } => ErrorCategory::Validation,

            CompareError::IoError { .. } => ErrorCategory::Io,

            CompareError::InternalError { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CompareError::MalformedExpectedEvent { .. } => "MALFORMED_EXPECTED_EVENT",
            CompareError::InvalidDbOp { .. } => "INVALID_DB_OP",
            CompareError::InvalidFields { .. } => "INVALID_FIELDS",
            CompareError::UnknownEventKind { .. } => "UNKNOWN_EVENT_KIND",
            CompareError::MalformedTraceDocument { .. } => "MALFORMED_TRACE_DOCUMENT",
            CompareError::JsonError(_) => "JSON_ERROR",
            CompareError::IoError { .. } => "IO_ERROR",
            CompareError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }
}
