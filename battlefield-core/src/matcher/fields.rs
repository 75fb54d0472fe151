//! Field Matcher - subset comparison of expected fields against a payload
//!
//! Rules, per expected key:
//! - `"*"` accepts anything (the key may even be missing)
//! - otherwise the key must exist in the observed object
//! - `"null"` accepts an observed JSON `null`
//! - otherwise values must be equal, see [`values_equal`]
//!
//! Keys present only in the observed payload are ignored.

use serde_json::{Map, Number, Value};

use crate::expected::WILDCARD;

/// Whether `value` is the wildcard sentinel
pub fn is_wildcard(value: &Value) -> bool {
    value.as_str() == Some(WILDCARD)
}

/// Compare expected fields against a JSON-encoded observed payload
///
/// An empty expectation matches anything, including an empty or
/// unparseable payload. A non-empty expectation never matches a payload that
/// does not decode to a JSON object.
pub fn fields_match(expected: &Map<String, Value>, observed: &str) -> bool {
    if expected.is_empty() {
        return true;
    }

    let Ok(Value::Object(observed)) = serde_json::from_str::<Value>(observed) else {
        return false;
    };

    expected.iter().all(|(key, want)| {
        if is_wildcard(want) {
            return true;
        }
        match observed.get(key) {
            None => false,
            Some(Value::Null) if want.as_str() == Some("null") => true,
            Some(got) => values_equal(got, want),
        }
    })
}

/// JSON equality with numeric normalisation
///
/// Numbers compare by value (`1` == `1.0`) and booleans equal `1`/`0`, since
/// ABI encoders emit booleans both ways. Arrays and objects recurse.
pub fn values_equal(observed: &Value, expected: &Value) -> bool {
    match (observed, expected) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Bool(flag), Value::Number(n)) | (Value::Number(n), Value::Bool(flag)) => {
            n.as_f64() == Some(if *flag { 1.0 } else { 0.0 })
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => observed == expected,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
