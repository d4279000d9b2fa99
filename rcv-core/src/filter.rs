/*!
Deep key exclusion.

Removes a configured set of keys from a [`Value`] tree at every depth,
including mappings nested inside sequences, before two values are compared.
*/

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::value::{Mapping, Value};

/// Key names excluded from comparison at every nesting depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreKeys(BTreeSet<String>);

impl IgnoreKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, key: S) -> bool {
        self.0.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreKeys {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for IgnoreKeys {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Rebuild `value` without any mapping entry whose key is in `ignore_keys`.
///
/// Retained mapping values and every sequence element are filtered
/// recursively; scalars pass through unchanged. Filtering is idempotent.
///
/// # Example
/// ```rust
/// use rcv_core::{filter, IgnoreKeys, Value};
///
/// let value = Value::from(serde_json::json!({"id": 1, "items": [{"id": 2, "name": "a"}]}));
/// let ignore: IgnoreKeys = ["id"].into_iter().collect();
///
/// let filtered = filter(&value, &ignore);
/// assert_eq!(filtered, Value::from(serde_json::json!({"items": [{"name": "a"}]})));
/// ```
pub fn filter(value: &Value, ignore_keys: &IgnoreKeys) -> Value {
    if ignore_keys.is_empty() {
        return value.clone();
    }
    filter_value(value, ignore_keys)
}

fn filter_value(value: &Value, ignore_keys: &IgnoreKeys) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(filter_mapping(map, ignore_keys)),
        Value::Sequence(items) => Value::Sequence(
            items
                .iter()
                .map(|item| filter_value(item, ignore_keys))
                .collect(),
        ),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

fn filter_mapping(map: &Mapping, ignore_keys: &IgnoreKeys) -> Mapping {
    map.iter()
        .filter(|(key, _)| !ignore_keys.contains(key))
        .map(|(key, value)| (key.clone(), filter_value(value, ignore_keys)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(names: &[&str]) -> IgnoreKeys {
        names.iter().copied().collect()
    }

    #[test]
    fn test_filter_top_level_keys() {
        let value = Value::from(json!({"a": 1, "b": 2, "c": 3}));
        let filtered = filter(&value, &keys(&["a", "b"]));
        assert_eq!(filtered, Value::from(json!({"c": 3})));
    }

    #[test]
    fn test_filter_with_no_keys_is_identity() {
        let value = Value::from(json!({"a": 1, "b": {"c": [1, 2]}}));
        assert_eq!(filter(&value, &IgnoreKeys::new()), value);
    }

    #[test]
    fn test_filter_nested_keys() {
        let value = Value::from(json!({
            "a": 1,
            "b": 2,
            "c": 3,
            "d": {"a": 1, "b": {"nested_except": true}, "c": "safe"}
        }));
        let filtered = filter(&value, &keys(&["a", "b"]));
        assert_eq!(filtered, Value::from(json!({"c": 3, "d": {"c": "safe"}})));
    }

    #[test]
    fn test_filter_ignored_key_with_mapping_value_is_dropped() {
        let value = Value::from(json!({"meta": {"created": 1}, "keep": {"meta": {"x": 1}}}));
        let filtered = filter(&value, &keys(&["meta"]));
        assert_eq!(filtered, Value::from(json!({"keep": {}})));
    }

    #[test]
    fn test_filter_keys_nested_in_arrays() {
        let value = Value::from(json!({
            "c": 3,
            "e": [
                {"a": 1},
                {"b": 2},
                {"c": 3},
                {"d": [[{"a": 1}], {"c": "safe"}]}
            ]
        }));
        let filtered = filter(&value, &keys(&["a", "b"]));
        assert_eq!(
            filtered,
            Value::from(json!({
                "c": 3,
                "e": [{}, {}, {"c": 3}, {"d": [[{}], {"c": "safe"}]}]
            }))
        );
    }

    #[test]
    fn test_filter_root_sequence() {
        let value = Value::from(json!([
            [{"a": 1, "b": 2, "c": 3}, {"a": 1}, {"c": 3}],
            {"a": 1},
            {"c": 3}
        ]));
        let filtered = filter(&value, &keys(&["a", "b"]));
        assert_eq!(
            filtered,
            Value::from(json!([[{"c": 3}, {}, {"c": 3}], {}, {"c": 3}]))
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ignore = keys(&["id", "at"]);
        let value = Value::from(json!({
            "id": 1,
            "rows": [{"id": 2, "at": "now", "v": [{"id": 3, "w": 4}]}],
            "nested": {"at": 5, "deep": {"id": 6, "keep": true}}
        }));
        let once = filter(&value, &ignore);
        assert_eq!(filter(&once, &ignore), once);
    }

    #[test]
    fn test_scalars_pass_through() {
        let ignore = keys(&["a"]);
        assert_eq!(filter(&Value::from("a"), &ignore), Value::from("a"));
        assert_eq!(filter(&Value::Null, &ignore), Value::Null);
        assert_eq!(filter(&Value::from(2.5), &ignore), Value::from(2.5));
    }

    #[test]
    fn test_ignore_keys_deserializes_from_list() {
        let ignore: IgnoreKeys = serde_json::from_str(r#"["b", "a", "b"]"#).unwrap();
        assert_eq!(ignore.len(), 2);
        assert_eq!(ignore.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
