//! Tolerant field extraction over `serde_json::Value`, shared by every
//! upstream-document parser. Lookups are dot-path cascades that yield the
//! first usable candidate; nothing here ever fails.

use serde_json::Value;

pub(crate) trait PointerPath {
    fn pointer_path(&self, path: &str) -> Option<&Value>;
}

impl PointerPath for Value {
    /// Dot-separated lookup, e.g. `"details.eventOwnerTeamAbbrev"`.
    fn pointer_path(&self, path: &str) -> Option<&Value> {
        let mut cur = self;
        for seg in path.split('.') {
            cur = cur.get(seg)?;
        }
        Some(cur)
    }
}

/// Strings may arrive bare or wrapped in a localized `{"default": "..."}`
/// object; both unwrap to the string.
pub(crate) fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("default").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// First non-empty string among the dot-path candidates.
pub(crate) fn first_str(v: &Value, paths: &[&str]) -> Option<String> {
    for path in paths {
        if let Some(s) = v.pointer_path(path).and_then(as_text) {
            if !s.trim().is_empty() {
                return Some(s);
            }
        }
    }
    None
}

pub(crate) fn first_u32(v: &Value, paths: &[&str]) -> Option<u32> {
    for path in paths {
        let found = v.pointer_path(path);
        if let Some(n) = found.and_then(Value::as_u64) {
            return u32::try_from(n).ok();
        }
        if let Some(s) = found.and_then(Value::as_str) {
            if let Ok(n) = s.trim().parse::<u32>() {
                return Some(n);
            }
        }
    }
    None
}

pub(crate) fn first_i64(v: &Value, paths: &[&str]) -> Option<i64> {
    for path in paths {
        let found = v.pointer_path(path);
        if let Some(n) = found.and_then(Value::as_i64) {
            return Some(n);
        }
        if let Some(s) = found.and_then(Value::as_str) {
            if let Ok(n) = s.trim().parse::<i64>() {
                return Some(n);
            }
        }
    }
    None
}
