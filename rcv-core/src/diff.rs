/*!
Structural differ.

Compares two values after key filtering and reports which dotted key paths
were added, removed or updated. A shared key whose value changed is always
reported as updated, even when the real change sits further down; when both
sides are mappings the walk continues into them so the changed leaves are
reported at their own paths as well.
*/

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::filter::{filter, IgnoreKeys};
use crate::value::{Mapping, Value};

/// Key paths that differ between an existing and a new value.
///
/// Paths keep discovery order and are deduplicated. Equality ignores order.
#[derive(Debug, Clone, Default, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub updated: Vec<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Every reported path, in added/removed/updated order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(&self.removed)
            .chain(&self.updated)
            .map(String::as_str)
    }
}

impl PartialEq for DiffResult {
    fn eq(&self, other: &Self) -> bool {
        fn as_set(paths: &[String]) -> HashSet<&str> {
            paths.iter().map(String::as_str).collect()
        }
        as_set(&self.added) == as_set(&other.added)
            && as_set(&self.removed) == as_set(&other.removed)
            && as_set(&self.updated) == as_set(&other.updated)
    }
}

/// Outcome of a filtered comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub equal: bool,
    pub diff: DiffResult,
}

/// Filter both values with `ignore_keys`, then compare them.
///
/// # Example
/// ```rust
/// use rcv_core::{compare, IgnoreKeys, Value};
/// use serde_json::json;
///
/// let existing = Value::from(json!({"a": 1, "b": {"c": {"d": 2}}}));
/// let new = Value::from(json!({"a": 2, "b": {"d": 2}}));
///
/// let comparison = compare(&existing, &new, &IgnoreKeys::new());
/// assert!(!comparison.equal);
/// assert_eq!(comparison.diff.updated, vec!["a", "b"]);
/// assert_eq!(comparison.diff.removed, vec!["b.c"]);
/// assert_eq!(comparison.diff.added, vec!["b.d"]);
/// ```
pub fn compare(existing: &Value, new: &Value, ignore_keys: &IgnoreKeys) -> Comparison {
    let existing = filter(existing, ignore_keys);
    let new = filter(new, ignore_keys);

    if existing == new {
        return Comparison {
            equal: true,
            diff: DiffResult::default(),
        };
    }

    Comparison {
        equal: false,
        diff: walk_roots(&existing, &new),
    }
}

/// Structured diff of two values under `ignore_keys`.
///
/// Equal values produce an empty result.
pub fn diff(existing: &Value, new: &Value, ignore_keys: &IgnoreKeys) -> DiffResult {
    compare(existing, new, ignore_keys).diff
}

fn walk_roots(existing: &Value, new: &Value) -> DiffResult {
    let mut collector = Collector::default();
    if let (Value::Mapping(existing), Value::Mapping(new)) = (existing, new) {
        walk(existing, new, None, &mut collector);
    }
    collector.finish()
}

fn walk(existing: &Mapping, new: &Mapping, prefix: Option<&str>, out: &mut Collector) {
    for (key, new_value) in new {
        let path = join(prefix, key);
        match existing.get(key) {
            None => out.added.push(path),
            Some(old_value) if old_value != new_value => {
                if let (Value::Mapping(old_map), Value::Mapping(new_map)) = (old_value, new_value)
                {
                    out.updated.push(path.clone());
                    walk(old_map, new_map, Some(&path), out);
                } else {
                    out.updated.push(path);
                }
            }
            Some(_) => {}
        }
    }

    for key in existing.keys() {
        if !new.contains_key(key) {
            out.removed.push(join(prefix, key));
        }
    }
}

fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

#[derive(Default)]
struct Collector {
    added: PathList,
    removed: PathList,
    updated: PathList,
}

impl Collector {
    fn finish(self) -> DiffResult {
        DiffResult {
            added: self.added.paths,
            removed: self.removed.paths,
            updated: self.updated.paths,
        }
    }
}

/// Insertion-ordered path list that drops repeats.
#[derive(Default)]
struct PathList {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl PathList {
    fn push(&mut self, path: String) {
        if self.seen.insert(path.clone()) {
            self.paths.push(path);
        }
    }
}
