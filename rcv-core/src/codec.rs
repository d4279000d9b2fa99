/*!
Codecs for the on-disk snapshot representation.

The default backend writes pretty-printed JSON; YAML is available as an
alternative. Any serde format can be plugged in by implementing [`Codec`].
*/

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Number, RcvError, Result, Snapshot, Value};

/// Deepest container nesting inside `data` that every codec reads back.
///
/// Both `serde_json` and `serde_yaml` stop decoding at 128 levels, so
/// anything deeper would be written once and then never recognised again.
pub const MAX_DEPTH: usize = 100;

/// Serialization backend converting a [`Snapshot`] to and from text
///
/// `encode` must be deterministic for equal input so that rewriting an
/// unchanged snapshot produces byte-identical files.
#[cfg_attr(test, mockall::automock)]
pub trait Codec: Send + Sync {
    /// Encode the snapshot to its persisted text form
    fn encode(&self, snapshot: &Snapshot) -> Result<String>;

    /// Decode persisted text
    ///
    /// # Returns
    /// The snapshot, or `RcvError::Decode` if the text is not valid in
    /// this codec's format
    fn decode(&self, text: &str) -> Result<Snapshot>;

    /// Get the name of the codec
    fn name(&self) -> &'static str;
}

/// Check that `value` survives an encode/decode round trip
///
/// # Errors
/// * `RcvError::Validation` - If a float is NaN or infinite, or containers
///   nest deeper than [`MAX_DEPTH`]
pub fn ensure_encodable(value: &Value) -> Result<()> {
    check_depth(value, 0)
}

fn check_depth(value: &Value, depth: usize) -> Result<()> {
    match value {
        Value::Number(Number::Float(n)) if !n.is_finite() => Err(RcvError::validation(format!(
            "Cannot encode non-finite number {n}"
        ))),
        Value::Sequence(_) | Value::Mapping(_) if depth >= MAX_DEPTH => {
            Err(RcvError::validation(format!(
                "Cannot encode data nested deeper than {MAX_DEPTH} levels"
            )))
        }
        Value::Sequence(items) => items.iter().try_for_each(|v| check_depth(v, depth + 1)),
        Value::Mapping(map) => map.values().try_for_each(|v| check_depth(v, depth + 1)),
        _ => Ok(()),
    }
}

/// Pretty-printed JSON codec (the default)
///
/// # Example
/// ```rust
/// use rcv_core::{Codec, PrettyJsonCodec, Snapshot, Value};
///
/// let codec = PrettyJsonCodec::new();
/// let snapshot = Snapshot::new("tests/api.rs", Value::from("body"));
/// let text = codec.encode(&snapshot)?;
/// assert_eq!(codec.decode(&text)?, snapshot);
/// # Ok::<(), rcv_core::RcvError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrettyJsonCodec;

impl PrettyJsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for PrettyJsonCodec {
    fn encode(&self, snapshot: &Snapshot) -> Result<String> {
        ensure_encodable(&snapshot.data)?;
        let mut text = serde_json::to_string_pretty(snapshot)?;
        text.push('\n');
        Ok(text)
    }

    fn decode(&self, text: &str) -> Result<Snapshot> {
        serde_json::from_str(text).map_err(|e| RcvError::decode(self.name(), e.to_string()))
    }

    fn name(&self) -> &'static str {
        "pretty_json"
    }
}

/// YAML codec
#[derive(Debug, Clone, Default)]
pub struct YamlCodec;

impl YamlCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for YamlCodec {
    fn encode(&self, snapshot: &Snapshot) -> Result<String> {
        ensure_encodable(&snapshot.data)?;
        Ok(serde_yaml::to_string(snapshot)?)
    }

    fn decode(&self, text: &str) -> Result<Snapshot> {
        serde_yaml::from_str(text).map_err(|e| RcvError::decode(self.name(), e.to_string()))
    }

    fn name(&self) -> &'static str {
        "yaml"
    }
}

/// Serialisable codec selector used by configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecKind {
    #[default]
    PrettyJson,
    Yaml,
}

impl CodecKind {
    /// Instantiate the selected backend
    pub fn build(self) -> Arc<dyn Codec> {
        match self {
            CodecKind::PrettyJson => Arc::new(PrettyJsonCodec::new()),
            CodecKind::Yaml => Arc::new(YamlCodec::new()),
        }
    }
}
