//! Suite-wide configuration
//!
//! This module provides an explicit, immutable configuration value that
//! seeds the per-call [`Options`]. It can be constructed in code or loaded
//! from a JSON or YAML file. Resetting to defaults is simply building a new
//! value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::CodecKind;
use crate::filter::IgnoreKeys;
use crate::options::Options;
use crate::{RcvError, Result};

/// Configuration shared by every snapshot in a suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcvConfig {
    /// Codec used to write and read fixtures
    pub codec: CodecKind,
    /// Keys excluded from comparison at every depth
    pub ignore_keys: IgnoreKeys,
    /// Raise on mismatch instead of overwriting
    pub fail_on_changed_output: bool,
    /// Directory that fixture paths are resolved against
    pub base_path: Option<PathBuf>,
}

impl RcvConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: RcvConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RcvConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    ///
    /// Files ending in `.yml` or `.yaml` are parsed as YAML, everything
    /// else as JSON.
    ///
    /// # Errors
    /// * `RcvError::Io` - If the file cannot be read
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml" | "yaml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ignore_keys.iter().any(str::is_empty) {
            return Err(RcvError::validation("ignore_keys must not contain empty names"));
        }
        if let Some(base) = &self.base_path {
            if base.as_os_str().is_empty() {
                return Err(RcvError::validation("base_path must not be empty"));
            }
        }
        Ok(())
    }

    /// Fresh per-call options seeded from this configuration
    ///
    /// # Example
    /// ```rust
    /// use rcv_core::RcvConfig;
    ///
    /// let config = RcvConfig::from_json_str(r#"{"ignore_keys": ["id"]}"#)?;
    /// let options = config.options().with_fixture("users.json");
    /// assert!(options.ignore_keys.contains("id"));
    /// assert!(options.fail_on_changed_output);
    /// # Ok::<(), rcv_core::RcvError>(())
    /// ```
    pub fn options(&self) -> Options {
        Options {
            codec: self.codec.build(),
            ignore_keys: self.ignore_keys.clone(),
            fail_on_changed_output: self.fail_on_changed_output,
            base_path: self.base_path.clone(),
            ..Options::default()
        }
    }
}

impl Default for RcvConfig {
    fn default() -> Self {
        RcvConfig {
            codec: CodecKind::PrettyJson,
            ignore_keys: IgnoreKeys::new(),
            fail_on_changed_output: true,
            base_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RcvConfig::default();
        assert_eq!(config.codec, CodecKind::PrettyJson);
        assert!(config.ignore_keys.is_empty());
        assert!(config.fail_on_changed_output);
        assert!(config.base_path.is_none());
    }

    #[test]
    fn test_from_json_partial() {
        let config = RcvConfig::from_json_str(r#"{"base_path": "test"}"#).unwrap();
        assert_eq!(config.base_path, Some(PathBuf::from("test")));
        assert!(config.fail_on_changed_output);
        assert_eq!(config.codec, CodecKind::PrettyJson);
    }

    #[test]
    fn test_from_yaml() {
        let config = RcvConfig::from_yaml_str(
            "codec: yaml\nignore_keys:\n  - id\n  - updated_at\nfail_on_changed_output: false\n",
        )
        .unwrap();
        assert_eq!(config.codec, CodecKind::Yaml);
        assert!(config.ignore_keys.contains("updated_at"));
        assert!(!config.fail_on_changed_output);
    }

    #[test]
    fn test_from_file_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let yaml_path = temp_dir.path().join("rcv.yaml");
        fs::write(&yaml_path, "codec: yaml\n").unwrap();
        assert_eq!(RcvConfig::from_file(&yaml_path).unwrap().codec, CodecKind::Yaml);

        let json_path = temp_dir.path().join("rcv.json");
        fs::write(&json_path, r#"{"ignore_keys": ["a"]}"#).unwrap();
        assert!(RcvConfig::from_file(&json_path)
            .unwrap()
            .ignore_keys
            .contains("a"));
    }

    #[test]
    fn test_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = RcvConfig::from_file(temp_dir.path().join("missing.json"));
        match result {
            Err(RcvError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_names() {
        let result = RcvConfig::from_json_str(r#"{"ignore_keys": ["ok", ""]}"#);
        assert!(matches!(result, Err(RcvError::Validation(_))));

        let config = RcvConfig {
            base_path: Some(PathBuf::new()),
            ..RcvConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_options_from_config() {
        let config = RcvConfig {
            codec: CodecKind::Yaml,
            ignore_keys: ["id"].into_iter().collect(),
            fail_on_changed_output: false,
            base_path: Some(PathBuf::from("fixtures")),
        };
        let options = config.options().with_fixture("a.yml");
        assert_eq!(options.codec.name(), "yaml");
        assert!(options.ignore_keys.contains("id"));
        assert!(!options.fail_on_changed_output);
        assert_eq!(
            options.fixture_location().unwrap(),
            PathBuf::from("fixtures/a.yml")
        );
    }

    #[test]
    fn test_overrides_do_not_touch_config() {
        let config = RcvConfig::default();
        let options = config.options().with_base_path("elsewhere");
        assert_eq!(options.base_path, Some(PathBuf::from("elsewhere")));
        assert!(config.base_path.is_none());
    }
}
