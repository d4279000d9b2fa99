/*!
Error types for the rcv core engine.
*/

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::diff::DiffResult;

/// Result type used throughout the rcv core.
pub type Result<T> = std::result::Result<T, RcvError>;

/// Hint shown at the top of every mismatch report.
pub const CHANGED_OUTPUT_HINT: &str =
    "Existing data will be overwritten. Turn off this feature with fail_on_changed_output=false";

/// Errors that can occur while evaluating a snapshot.
#[derive(Error, Debug)]
pub enum RcvError {
    /// I/O errors during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Fixture text is not valid in the codec's format
    #[error("Failed to decode fixture with {codec} codec: {message}")]
    Decode { codec: &'static str, message: String },

    /// Storage adapter errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// The value producer could not build the live value
    #[error("Value producer failed: {0}")]
    Producer(String),

    /// Fresh output differs from the recorded fixture
    #[error(transparent)]
    DataChanged(Box<DataChangedError>),
}

impl RcvError {
    /// Create a new decode error
    pub fn decode<S: Into<String>>(codec: &'static str, msg: S) -> Self {
        Self::Decode {
            codec,
            message: msg.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new producer error
    pub fn producer<S: Into<String>>(msg: S) -> Self {
        Self::Producer(msg.into())
    }

    /// The mismatch report, if this error is one
    pub fn as_data_changed(&self) -> Option<&DataChangedError> {
        match self {
            Self::DataChanged(changed) => Some(changed),
            _ => None,
        }
    }
}

impl From<DataChangedError> for RcvError {
    fn from(err: DataChangedError) -> Self {
        Self::DataChanged(Box::new(err))
    }
}

/// Raised when the filtered comparison finds a difference and
/// `fail_on_changed_output` is set.
///
/// Carries both views of the change: the structured key paths and the
/// line-oriented diff of the encoded fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct DataChangedError {
    /// Fixture that would have been overwritten
    pub fixture_path: PathBuf,
    /// Key paths that were added, removed or updated
    pub diff: DiffResult,
    /// Unified diff of the existing file against the new encoding
    pub text_diff: String,
}

impl DataChangedError {
    pub fn added(&self) -> &[String] {
        &self.diff.added
    }

    pub fn removed(&self) -> &[String] {
        &self.diff.removed
    }

    pub fn updated(&self) -> &[String] {
        &self.diff.updated
    }
}

impl fmt::Display for DataChangedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{CHANGED_OUTPUT_HINT}")?;
        writeln!(f)?;
        writeln!(f, "Fixture: {}", self.fixture_path.display())?;
        writeln!(f, "The following keys were added: {:?}", self.diff.added)?;
        writeln!(f, "The following keys were removed: {:?}", self.diff.removed)?;
        writeln!(f, "The following keys were updated: {:?}", self.diff.updated)?;
        if !self.text_diff.is_empty() {
            writeln!(f)?;
            write!(f, "{}", self.text_diff)?;
        }
        Ok(())
    }
}

impl std::error::Error for DataChangedError {}
