/*!
Per-invocation options for the snapshot handler.
*/

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::codec::{Codec, PrettyJsonCodec};
use crate::filter::IgnoreKeys;
use crate::strategy::{Comparator, FilteredEquality, ValueProducer};
use crate::{RcvError, Result};

/// Shared value producer stored in [`Options`]
pub type SharedProducer = Arc<dyn ValueProducer + Send + Sync>;

/// Fully resolved options for one handler call
///
/// Built from an [`RcvConfig`](crate::RcvConfig) or from `Options::default()`
/// and adjusted per call with the `with_*` methods.
///
/// # Example
/// ```rust
/// use rcv_core::Options;
///
/// let options = Options::default()
///     .with_base_path("tests/fixtures")
///     .with_fixture("users/list.json")
///     .with_ignore_keys(["id", "created_at"]);
///
/// assert_eq!(
///     options.fixture_location()?,
///     std::path::Path::new("tests/fixtures/users/list.json")
/// );
/// # Ok::<(), rcv_core::RcvError>(())
/// ```
#[derive(Clone)]
pub struct Options {
    /// Producer used by `Handler::evaluate_exportable`
    pub exportable_value: Option<SharedProducer>,
    /// Equality predicate between recorded and fresh data
    pub compare_with: Arc<dyn Comparator>,
    /// On-disk representation
    pub codec: Arc<dyn Codec>,
    /// Keys excluded from comparison at every depth
    pub ignore_keys: IgnoreKeys,
    /// Raise on mismatch instead of overwriting
    pub fail_on_changed_output: bool,
    /// Directory prefix for `fixture_path`
    pub base_path: Option<PathBuf>,
    /// Target fixture file
    pub fixture_path: Option<PathBuf>,
}

impl Options {
    pub fn with_exportable_value<P>(mut self, producer: P) -> Self
    where
        P: ValueProducer + Send + Sync + 'static,
    {
        self.exportable_value = Some(Arc::new(producer));
        self
    }

    pub fn with_comparator<C: Comparator + 'static>(mut self, comparator: C) -> Self {
        self.compare_with = Arc::new(comparator);
        self
    }

    pub fn with_codec<C: Codec + 'static>(mut self, codec: C) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    pub fn with_shared_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }

    /// Replace the ignore set
    pub fn with_ignore_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_keys = keys.into_iter().collect();
        self
    }

    pub fn with_fail_on_changed_output(mut self, fail: bool) -> Self {
        self.fail_on_changed_output = fail;
        self
    }

    pub fn with_base_path<P: AsRef<Path>>(mut self, base_path: P) -> Self {
        self.base_path = Some(base_path.as_ref().to_path_buf());
        self
    }

    pub fn with_fixture<P: AsRef<Path>>(mut self, fixture_path: P) -> Self {
        self.fixture_path = Some(fixture_path.as_ref().to_path_buf());
        self
    }

    /// Resolve the fixture file, joined onto `base_path` when one is set
    ///
    /// # Errors
    /// * `RcvError::Validation` - If no fixture path was configured
    pub fn fixture_location(&self) -> Result<PathBuf> {
        let fixture = self
            .fixture_path
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| RcvError::validation("No fixture path configured"))?;

        Ok(match &self.base_path {
            Some(base) => base.join(fixture),
            None => fixture.clone(),
        })
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            exportable_value: None,
            compare_with: Arc::new(FilteredEquality),
            codec: Arc::new(PrettyJsonCodec::new()),
            ignore_keys: IgnoreKeys::new(),
            fail_on_changed_output: true,
            base_path: None,
            fixture_path: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("exportable_value", &self.exportable_value.is_some())
            .field("codec", &self.codec.name())
            .field("ignore_keys", &self.ignore_keys)
            .field("fail_on_changed_output", &self.fail_on_changed_output)
            .field("base_path", &self.base_path)
            .field("fixture_path", &self.fixture_path)
            .finish_non_exhaustive()
    }
}
