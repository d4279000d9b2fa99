/*!
# rcv Core Engine

Golden-file ("snapshot") recorder and comparator for test suites.

A test produces a value at runtime. The first time it is seen the value is
persisted to a fixture file; on every later run the fresh value is compared
against the fixture and unexpected drift is reported with:

- Key filtering at every nesting depth before comparison
- A structured diff of added, removed and updated key paths
- A line-oriented text diff of the encoded fixtures
- Pluggable codecs (pretty JSON by default, YAML) and storage adapters

## Architecture

- [`Value`] is the single representation both sides are normalised into
- [`Codec`] and [`StorageAdapter`] are ports with local implementations
- [`Handler`] orchestrates load, compare and write and returns an [`Outcome`]

## Usage

```rust
use rcv_core::{Handler, LocalFileStorage, Outcome, ProduceWith, RcvConfig};
use serde_json::json;

# let dir = tempfile::tempdir()?;
let config = RcvConfig { base_path: Some(dir.path().to_path_buf()), ..RcvConfig::default() };
let options = config.options().with_fixture("users/list.json").with_ignore_keys(["id"]);
let handler = Handler::new(LocalFileStorage::new());

let first = ProduceWith(|| json!({"users": [{"id": 1, "name": "ada"}]}));
assert_eq!(handler.evaluate("tests/users.rs", &first, &options)?, Outcome::WrittenToDisk);

// Only an ignored key changed
let second = ProduceWith(|| json!({"users": [{"id": 2, "name": "ada"}]}));
assert_eq!(handler.evaluate("tests/users.rs", &second, &options)?, Outcome::Same);

// A real change is reported and nothing is overwritten
let third = ProduceWith(|| json!({"users": [{"id": 2, "name": "grace"}]}));
let err = handler.evaluate("tests/users.rs", &third, &options).unwrap_err();
assert_eq!(err.as_data_changed().unwrap().updated(), ["users"]);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

pub mod codec;
pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod handler;
pub mod observability;
pub mod options;
pub mod report;
pub mod snapshot;
pub mod storage;
pub mod strategy;
pub mod value;

#[cfg(test)]
mod error_tests;

pub use codec::{Codec, CodecKind, PrettyJsonCodec, YamlCodec};
pub use config::RcvConfig;
pub use diff::{compare, Comparison, DiffResult};
pub use error::{DataChangedError, RcvError, Result};
pub use filter::{filter, IgnoreKeys};
pub use handler::{create_default_handler, evaluate, Handler, Outcome};
pub use options::Options;
pub use snapshot::Snapshot;
pub use storage::{LocalFileStorage, StorageAdapter};
pub use strategy::{Comparator, FilteredEquality, ProduceWith, ValueProducer};
pub use value::{Mapping, Number, Value};
