//! Shallow equality over JSON records.
//!
//! Two records are equal when they have the same number of keys and every
//! key of `a` maps to a strictly equal value in `b`. Scalars (`null`, bool,
//! number, string) compare by value; objects and arrays compare by identity,
//! so two separately built `{}` values are different.

use serde_json::{Map, Value};

/// Strict equality of two record values.
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(_), Value::Object(_)) | (Value::Array(_), Value::Array(_)) => {
            std::ptr::eq(a, b)
        }
        _ => a == b,
    }
}

/// Shallow comparison of two records.
///
/// ```
/// use range_picker::equality::shallow_equal;
/// use serde_json::json;
///
/// let a = json!({"a": 1, "b": 2});
/// let b = json!({"a": 1, "b": 2});
/// assert!(shallow_equal(a.as_object().unwrap(), b.as_object().unwrap()));
/// ```
pub fn shallow_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| strict_eq(value, other)))
}

/// [`shallow_equal`] lifted to arbitrary values: two objects are compared
/// shallowly, anything else strictly.
pub fn shallow_equal_values(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => shallow_equal(a, b),
        _ => strict_eq(a, b),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
