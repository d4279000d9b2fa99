/*!
The persisted snapshot record.
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A previously accepted value together with where and when it was recorded.
///
/// Field order is the on-disk order: `recorded_at`, `file`, `data`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// When the snapshot was written
    pub recorded_at: DateTime<Utc>,

    /// Identifier of the originating test (usually its source file)
    #[serde(rename = "file")]
    pub source_id: String,

    /// The recorded value
    pub data: Value,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time
    ///
    /// # Example
    /// ```rust
    /// use rcv_core::{Snapshot, Value};
    ///
    /// let snapshot = Snapshot::new("tests/api.rs", Value::from("body"));
    /// assert_eq!(snapshot.source_id, "tests/api.rs");
    /// ```
    pub fn new<S: Into<String>>(source_id: S, data: Value) -> Self {
        Self {
            recorded_at: Utc::now(),
            source_id: source_id.into(),
            data,
        }
    }

    /// Override the recording time
    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// True when this snapshot came from `source_id` and holds exactly `data`.
    ///
    /// No key filtering is applied.
    pub fn is_identical(&self, source_id: &str, data: &Value) -> bool {
        self.source_id == source_id && &self.data == data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_new_stamps_now() {
        let snapshot = Snapshot::new("tests/handler.rs", Value::from("x"));
        let drift = (Utc::now() - snapshot.recorded_at).num_seconds().abs();
        assert!(drift <= 2);
    }

    #[test]
    fn test_serialized_field_names_and_order() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let snapshot = Snapshot::new("a.rs", Value::from(1)).with_recorded_at(at);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            json,
            r#"{"recorded_at":"2024-03-01T12:00:00Z","file":"a.rs","data":1}"#
        );
    }

    #[test]
    fn test_is_identical() {
        let snapshot = Snapshot::new("a.rs", Value::from("x"));
        assert!(snapshot.is_identical("a.rs", &Value::from("x")));
        assert!(!snapshot.is_identical("b.rs", &Value::from("x")));
        assert!(!snapshot.is_identical("a.rs", &Value::from("y")));
    }
}
