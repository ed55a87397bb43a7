use std::cmp::Ordering;

use reviewdoc_config::SchemaConfig;
use serde_json::Value;

/// Orders the operations under a path. Generated operation IDs carry an
/// underscore (`Pets_List`), so those come before hand-written keys.
pub fn compare_operation_keys(a: &str, b: &str) -> Ordering {
    match (a.contains('_'), b.contains('_')) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

/// Whether `value` renders on a single line under the configured limits.
/// Containers holding other containers never do.
pub fn fits_inline(value: &Value, limits: &SchemaConfig) -> bool {
    match value {
        Value::Object(map) => {
            map.len() <= limits.max_inline_properties
                && map.values().all(|v| is_scalar(v) && fits_inline(v, limits))
        }
        Value::Array(items) => {
            items.len() <= limits.max_inline_elements
                && items.iter().all(|v| is_scalar(v) && fits_inline(v, limits))
        }
        Value::String(s) => s.chars().count() <= limits.max_inline_string_length,
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}

pub(super) fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}
