/*!
Snapshot handler that decides what happens to a freshly produced value.

The handler loads the recorded fixture (at most once), compares it with the
live value and returns one of three outcomes, or a [`DataChangedError`]
when the value drifted and drift is configured to fail.
*/

use std::path::Path;

use tracing::{debug, info, warn};

use crate::diff::diff;
use crate::error::DataChangedError;
use crate::options::Options;
use crate::report::text_diff;
use crate::storage::{LocalFileStorage, StorageAdapter};
use crate::strategy::ValueProducer;
use crate::{RcvError, Result, Snapshot, Value};

/// Result of a successful handler call
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Recorded fixture has the same source and identical data; nothing was compared or written
    NoChange,
    /// Recorded data matches under the configured comparator; nothing was written
    Same,
    /// A new fixture was written
    WrittenToDisk,
}

/// Fixture read from storage for one call
struct Existing {
    text: String,
    snapshot: Snapshot,
}

/// Golden-file handler
///
/// # Example
/// ```rust
/// use rcv_core::{Handler, LocalFileStorage, Options, Outcome, ProduceWith};
///
/// # let dir = tempfile::tempdir()?;
/// let handler = Handler::new(LocalFileStorage::new());
/// let options = Options::default()
///     .with_base_path(dir.path())
///     .with_fixture("greeting.json");
/// let producer = ProduceWith(|| "hello");
///
/// assert_eq!(handler.evaluate("tests/greeting.rs", &producer, &options)?, Outcome::WrittenToDisk);
/// assert_eq!(handler.evaluate("tests/greeting.rs", &producer, &options)?, Outcome::NoChange);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Handler<S>
where
    S: StorageAdapter,
{
    storage: S,
}

impl<S> Handler<S>
where
    S: StorageAdapter,
{
    /// Create a new handler over the specified storage adapter
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Compare the value from `producer` against the fixture and act on it
    ///
    /// This method:
    /// 1. Produces the live value (exactly once)
    /// 2. Loads and decodes the fixture; undecodable fixtures count as absent
    /// 3. Returns `NoChange` if source and data are identical
    /// 4. Returns `Same` if the comparator accepts the new data
    /// 5. Fails with `DataChanged` if `fail_on_changed_output` is set
    /// 6. Otherwise writes a new snapshot and returns `WrittenToDisk`
    ///
    /// # Errors
    /// * `RcvError::Validation` - If no fixture path is configured
    /// * `RcvError::DataChanged` - If the value drifted and drift is fatal
    /// * `RcvError::Storage` - If reading or writing the fixture fails
    pub fn evaluate(
        &self,
        source_id: &str,
        producer: &dyn ValueProducer,
        options: &Options,
    ) -> Result<Outcome> {
        let path = options.fixture_location()?;
        let data = producer.produce()?;
        self.evaluate_value(source_id, data, &path, options)
    }

    /// Same as [`evaluate`](Self::evaluate) using `options.exportable_value`
    ///
    /// # Errors
    /// * `RcvError::Validation` - If no exportable value is configured
    pub fn evaluate_exportable(&self, source_id: &str, options: &Options) -> Result<Outcome> {
        let producer = options
            .exportable_value
            .clone()
            .ok_or_else(|| RcvError::validation("No exportable value configured"))?;
        self.evaluate(source_id, producer.as_ref(), options)
    }

    fn evaluate_value(
        &self,
        source_id: &str,
        data: Value,
        path: &Path,
        options: &Options,
    ) -> Result<Outcome> {
        let existing = self.load_existing(path, options)?;

        if let Some(existing) = &existing {
            if existing.snapshot.is_identical(source_id, &data) {
                debug!(path = %path.display(), "fixture unchanged");
                return Ok(Outcome::NoChange);
            }

            let comparator = &options.compare_with;
            if comparator.matches(&existing.snapshot.data, &data, &options.ignore_keys) {
                debug!(path = %path.display(), "fixture matches under comparator");
                return Ok(Outcome::Same);
            }
        }

        let snapshot = Snapshot::new(source_id, data);
        let encoded = options.codec.encode(&snapshot)?;

        if let Some(existing) = &existing {
            if options.fail_on_changed_output {
                let changed = DataChangedError {
                    fixture_path: path.to_path_buf(),
                    diff: diff(&existing.snapshot.data, &snapshot.data, &options.ignore_keys),
                    text_diff: text_diff(&existing.text, &encoded),
                };
                warn!(
                    path = %path.display(),
                    added = changed.diff.added.len(),
                    removed = changed.diff.removed.len(),
                    updated = changed.diff.updated.len(),
                    "fixture data changed"
                );
                return Err(changed.into());
            }
            debug!(path = %path.display(), "overwriting changed fixture");
        }

        self.storage.save(encoded.as_bytes(), path)?;
        info!(
            path = %path.display(),
            codec = options.codec.name(),
            source_id,
            "fixture written"
        );
        Ok(Outcome::WrittenToDisk)
    }

    fn load_existing(&self, path: &Path, options: &Options) -> Result<Option<Existing>> {
        let Some(bytes) = self.storage.load(path)? else {
            return Ok(None);
        };

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "fixture is not UTF-8, treating as absent");
                return Ok(None);
            }
        };

        match options.codec.decode(&text) {
            Ok(snapshot) => Ok(Some(Existing { text, snapshot })),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "fixture could not be decoded, treating as absent");
                Ok(None)
            }
        }
    }
}

/// Convenience function to create a handler over the local filesystem
pub fn create_default_handler() -> Handler<LocalFileStorage> {
    Handler::new(LocalFileStorage::new())
}

/// Evaluate a snapshot against the local filesystem
///
/// This is the single entry point a test-framework hook calls.
pub fn evaluate(source_id: &str, producer: &dyn ValueProducer, options: &Options) -> Result<Outcome> {
    create_default_handler().evaluate(source_id, producer, options)
}
