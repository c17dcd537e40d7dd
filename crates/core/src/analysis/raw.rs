//! Tolerant accessors over producer JSON.
//!
//! Every field of the analysis tree is read through an ordered path list:
//! nested current-schema path first, legacy flat path second, typed default
//! last. Paths are dotted key chains evaluated against the payload root (or
//! against a list element, for per-reviewer fields). A `null` leaf counts as
//! absent so the next path in the list gets a chance.

use serde_json::Value;

pub(crate) fn lookup<'a>(root: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| resolve(root, path))
}

fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// Permissive numeric coercion: JSON integers, floats (truncated), and
/// numeric strings all count. Anything else is treated as absent.
pub(crate) fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(|float| float as i64))
        }
        _ => None,
    }
}

pub(crate) fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => number.as_i64().map(|n| n != 0),
        Value::String(text) => match text.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn int_at(root: &Value, paths: &[&str], default: i64) -> i64 {
    lookup(root, paths).and_then(coerce_i64).unwrap_or(default)
}

pub(crate) fn f64_at(root: &Value, paths: &[&str]) -> Option<f64> {
    lookup(root, paths).and_then(coerce_f64)
}

pub(crate) fn bool_at(root: &Value, paths: &[&str], default: bool) -> bool {
    lookup(root, paths).and_then(coerce_bool).unwrap_or(default)
}

pub(crate) fn str_at(root: &Value, paths: &[&str], default: &str) -> String {
    opt_str_at(root, paths).unwrap_or_else(|| default.to_string())
}

pub(crate) fn opt_str_at(root: &Value, paths: &[&str]) -> Option<String> {
    lookup(root, paths)
        .and_then(Value::as_str)
        .map(|text| text.to_string())
}

pub(crate) fn opt_i64_at(root: &Value, paths: &[&str]) -> Option<i64> {
    lookup(root, paths).and_then(coerce_i64)
}

/// Free-text list used for recurring mistakes and refactor suggestions.
/// Elements may be plain strings or objects carrying a `description` or
/// `message` field; anything else is skipped rather than aborting the list.
pub(crate) fn string_list_at(root: &Value, paths: &[&str]) -> Vec<String> {
    let Some(items) = lookup(root, paths).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text.clone()),
            Value::Object(_) => lookup(item, &["description", "message"])
                .and_then(Value::as_str)
                .map(|text| text.to_string()),
            _ => None,
        })
        .collect()
}
