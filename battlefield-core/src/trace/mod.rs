//! Observed trace handling
//!
//! The trace document is nested (blocks → transaction traces → action
//! traces / db ops); the matcher wants two flat sequences. [`extract`] does
//! that flattening in a single pass.
//!
//! ```text
//! dm.log.json ──► TraceDocument ──► extract() ──► ObservedEvents
//!                                                  ├─ actions: [ObservedAction]
//!                                                  └─ db_ops:  [ObservedDbOp]
//! ```

mod document;
mod extract;

pub use document::{
    ActionRecord, ActionTrace, BlockRecord, DbOpRecord, TraceDocument, TransactionTrace,
    UNKNOWN_TRX_ID,
};
pub use extract::{extract, ObservedAction, ObservedDbOp, ObservedEvents};

pub(crate) use document::null_as_default;
