/*!
Pluggable strategies: how two values are judged equal and how the live
value is produced.
*/

use crate::diff::compare;
use crate::filter::IgnoreKeys;
use crate::value::Value;
use crate::Result;

/// Equality predicate between a recorded value and a fresh one
#[cfg_attr(test, mockall::automock)]
pub trait Comparator: Send + Sync {
    /// Whether `new` is an acceptable replacement for `existing`
    fn matches(&self, existing: &Value, new: &Value, ignore_keys: &IgnoreKeys) -> bool;
}

/// Default comparator: deep-filter both sides, then compare structurally
#[derive(Debug, Clone, Copy, Default)]
pub struct FilteredEquality;

impl Comparator for FilteredEquality {
    fn matches(&self, existing: &Value, new: &Value, ignore_keys: &IgnoreKeys) -> bool {
        compare(existing, new, ignore_keys).equal
    }
}

/// Produces the live value for a test
///
/// Implemented for every `Fn() -> Result<Value>` closure. Use
/// [`ProduceWith`] for infallible closures.
pub trait ValueProducer {
    fn produce(&self) -> Result<Value>;
}

impl<F> ValueProducer for F
where
    F: Fn() -> Result<Value>,
{
    fn produce(&self) -> Result<Value> {
        self()
    }
}

/// Adapter for closures that cannot fail
///
/// # Example
/// ```rust
/// use rcv_core::{ProduceWith, ValueProducer};
///
/// let producer = ProduceWith(|| "This is a test");
/// assert_eq!(producer.produce()?.as_str(), Some("This is a test"));
/// # Ok::<(), rcv_core::RcvError>(())
/// ```
pub struct ProduceWith<F>(pub F);

impl<F, V> ValueProducer for ProduceWith<F>
where
    F: Fn() -> V,
    V: Into<Value>,
{
    fn produce(&self) -> Result<Value> {
        Ok((self.0)().into())
    }
}
