//! Dot-path traversal over the nested configuration tree.
//!
//! Shared by `get` and `exists`. The traversal descends one segment at a
//! time, but before each descent the not-yet-consumed suffix is tried as a
//! literal key of the current mapping, so a key that itself contains dots
//! shadows the nested traversal from that point down.

use serde_json::{Map, Value};

/// Resolve a dot-delimited path against `root`.
///
/// Returns `None` when the path is empty, a segment is missing, or the
/// cursor hits a non-mapping value with segments still to consume.
pub(crate) fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let segments: Vec<&str> = path.split('.').collect();
    let mut cursor = root;

    for (index, segment) in segments.iter().enumerate() {
        // Literal match on the remaining suffix, dots included. For the
        // final segment this is the plain key lookup.
        let remainder = segments[index..].join(".");
        if let Some(value) = cursor.get(remainder.as_str()) {
            return Some(value);
        }

        cursor = cursor.get(*segment)?.as_object()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_single_segment() {
        let root = tree(json!({"host": "localhost"}));
        assert_eq!(lookup(&root, "host"), Some(&json!("localhost")));
    }

    #[test]
    fn test_nested_descent() {
        let root = tree(json!({"a": {"b": 2}}));
        assert_eq!(lookup(&root, "a.b"), Some(&json!(2)));
    }

    #[test]
    fn test_literal_key_wins_over_descent() {
        let root = tree(json!({"a.b": 1, "a": {"b": 2}}));
        assert_eq!(lookup(&root, "a.b"), Some(&json!(1)));
    }

    #[test]
    fn test_literal_key_matched_at_depth() {
        let root = tree(json!({"x": {"a.b": 5}}));
        assert_eq!(lookup(&root, "x.a.b"), Some(&json!(5)));
    }

    #[test]
    fn test_missing_path() {
        let root = tree(json!({"a": {"b": 2}}));
        assert_eq!(lookup(&root, "x.y"), None);
        assert_eq!(lookup(&root, "a.c"), None);
    }

    #[test]
    fn test_descent_through_scalar_fails() {
        let root = tree(json!({"a": 1}));
        assert_eq!(lookup(&root, "a.b"), None);
    }

    #[test]
    fn test_descent_through_array_fails() {
        let root = tree(json!({"a": [1, 2]}));
        assert_eq!(lookup(&root, "a.b"), None);
    }

    #[test]
    fn test_empty_path() {
        let root = tree(json!({"": 1}));
        assert_eq!(lookup(&root, ""), None);
    }

    #[test]
    fn test_null_value_resolves() {
        let root = tree(json!({"a": {"b": null}}));
        assert_eq!(lookup(&root, "a.b"), Some(&Value::Null));
    }
}
