//! Matching of expected events against observed events
//!
//! - [`fields`]: payload comparison (wildcards, `"null"`, subset semantics)
//! - [`sequential`]: forward-only search and the two per-kind passes

pub mod fields;
pub mod sequential;

pub use fields::{fields_match, is_wildcard, values_equal};
pub use sequential::{
    action_matches, db_op_matches, find_action, find_db_op, find_next, match_actions,
    match_db_ops,
};
