//! Deep merge of configuration mappings.
//!
//! Implements key-wise merging where incoming values override existing
//! values. Arrays are merged positionally, not concatenated.

use serde_json::{Map, Value};

/// Deep merge two values, with `incoming` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in incoming override keys in base
/// - Arrays are merged by position: element `i` of incoming replaces
///   element `i` of base (recursively, when both sides merge), indices
///   present only in base are left untouched, extra incoming elements
///   extend the result
/// - Everything else is replaced entirely
///
/// Repeated merges therefore never grow an array past the longest incoming
/// one; callers who want list growth append through
/// [`Config::push`](crate::Config::push) instead.
///
/// # Example
/// ```
/// use serde_json::json;
/// use dotconf::deep_merge;
///
/// let base = json!({
///     "server": { "port": 8080, "host": "localhost" },
///     "features": ["a", "b"]
/// });
/// let incoming = json!({
///     "server": { "port": 9000 },
///     "features": ["c"]
/// });
/// let result = deep_merge(base, incoming);
/// // Result: { "server": { "port": 9000, "host": "localhost" }, "features": ["c", "b"] }
/// ```
pub fn deep_merge(base: Value, incoming: Value) -> Value {
    match (base, incoming) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(incoming_map)) => {
            merge_map(&mut base_map, incoming_map);
            Value::Object(base_map)
        }
        // Both are arrays: replace by position
        (Value::Array(base_items), Value::Array(incoming_items)) => {
            let mut merged = base_items;
            for (index, item) in incoming_items.into_iter().enumerate() {
                if index < merged.len() {
                    let existing = std::mem::replace(&mut merged[index], Value::Null);
                    merged[index] = deep_merge(existing, item);
                } else {
                    merged.push(item);
                }
            }
            Value::Array(merged)
        }
        // Any other case: incoming replaces base entirely
        (_, incoming) => incoming,
    }
}

/// Merge `incoming` into `base` in place, key-wise.
pub(crate) fn merge_map(base: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, incoming_value) in incoming {
        let merged = match base.remove(&key) {
            Some(existing) => deep_merge(existing, incoming_value),
            None => incoming_value,
        };
        base.insert(key, merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_simple_objects() {
        let base = json!({"a": 1, "b": 2});
        let incoming = json!({"b": 3, "c": 4});
        let result = deep_merge(base, incoming);
        assert_eq!(result, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn test_merge_nested_objects() {
        let base = json!({
            "server": {"host": "localhost", "port": 8080},
            "debug": true
        });
        let incoming = json!({
            "server": {"port": 9000}
        });
        let result = deep_merge(base, incoming);
        assert_eq!(
            result,
            json!({
                "server": {"host": "localhost", "port": 9000},
                "debug": true
            })
        );
    }

    #[test]
    fn test_arrays_merged_by_position() {
        let base = json!({"items": [10, 20]});
        let incoming = json!({"items": [99]});
        let result = deep_merge(base, incoming);
        assert_eq!(result, json!({"items": [99, 20]}));
    }

    #[test]
    fn test_longer_incoming_array_extends() {
        let base = json!({"items": [1]});
        let incoming = json!({"items": [2, 3, 4]});
        let result = deep_merge(base, incoming);
        assert_eq!(result, json!({"items": [2, 3, 4]}));
    }

    #[test]
    fn test_array_elements_merge_recursively() {
        let base = json!({"servers": [{"host": "a", "port": 1}, {"host": "b"}]});
        let incoming = json!({"servers": [{"port": 2}]});
        let result = deep_merge(base, incoming);
        assert_eq!(
            result,
            json!({"servers": [{"host": "a", "port": 2}, {"host": "b"}]})
        );
    }

    #[test]
    fn test_incoming_null_replaces() {
        let base = json!({"a": 1, "b": {"c": 2}});
        let incoming = json!({"a": null});
        let result = deep_merge(base, incoming);
        assert_eq!(result, json!({"a": null, "b": {"c": 2}}));
    }

    #[test]
    fn test_deep_nested_merge() {
        let base = json!({
            "level1": {
                "level2": {
                    "level3": {"a": 1, "b": 2}
                }
            }
        });
        let incoming = json!({
            "level1": {
                "level2": {
                    "level3": {"b": 3, "c": 4}
                }
            }
        });
        let result = deep_merge(base, incoming);
        assert_eq!(
            result,
            json!({
                "level1": {
                    "level2": {
                        "level3": {"a": 1, "b": 3, "c": 4}
                    }
                }
            })
        );
    }

    #[test]
    fn test_incoming_replaces_primitive_with_object() {
        let base = json!({"value": 42});
        let incoming = json!({"value": {"nested": true}});
        let result = deep_merge(base, incoming);
        assert_eq!(result, json!({"value": {"nested": true}}));
    }

    #[test]
    fn test_incoming_replaces_object_with_primitive() {
        let base = json!({"value": {"nested": true}});
        let incoming = json!({"value": 42});
        let result = deep_merge(base, incoming);
        assert_eq!(result, json!({"value": 42}));
    }

    #[test]
    fn test_mixed_array_and_object_replace() {
        let base = json!({"value": [1, 2]});
        let incoming = json!({"value": {"a": 1}});
        assert_eq!(deep_merge(base, incoming), json!({"value": {"a": 1}}));

        let base = json!({"value": {"a": 1}});
        let incoming = json!({"value": [1, 2]});
        assert_eq!(deep_merge(base, incoming), json!({"value": [1, 2]}));
    }
}
