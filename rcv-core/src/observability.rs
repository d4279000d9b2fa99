/*!
Logging setup for test suites that want to see rcv's decisions.

The engine only emits `tracing` events; nothing is printed unless a
subscriber is installed, either by the host application or with
[`init_observability`].
*/

use tracing::subscriber::set_global_default;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry as TracingRegistry};

use crate::{RcvError, Result};

/// Default filter directive when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "rcv_core=info";

/// Output format for the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines, written through the test-capturing writer
    #[default]
    Pretty,
    /// Structured JSON lines
    Json,
}

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
        .map_err(|e| RcvError::validation(format!("Invalid log directive: {e}")))
}

/// Initialize the global tracing subscriber
///
/// # Arguments
/// * `format` - Whether to emit human-readable or JSON lines
///
/// # Returns
/// An error if a global subscriber is already installed
pub fn init_observability(format: LogFormat) -> Result<()> {
    let filter = env_filter()?;

    let installed = match format {
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_target(false);
            set_global_default(TracingRegistry::default().with(filter).with(fmt_layer))
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(false);
            set_global_default(TracingRegistry::default().with(filter).with(fmt_layer))
        }
    };

    installed.map_err(|e| {
        RcvError::validation(format!("Failed to set global tracing subscriber: {e}"))
    })?;

    tracing::debug!(?format, "rcv observability initialized");
    Ok(())
}

/// Initialize observability with default settings
pub fn init_default_observability() -> Result<()> {
    init_observability(LogFormat::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        assert!(env_filter().is_ok());
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVE).is_ok());
    }

    #[test]
    fn test_rust_log_takes_precedence_over_default() {
        std::env::set_var("RUST_LOG", "rcv_core=debug");
        let filter = env_filter().unwrap();
        std::env::remove_var("RUST_LOG");

        assert_eq!(
            filter.max_level_hint(),
            Some(tracing::level_filters::LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_init_only_once() {
        assert!(init_default_observability().is_ok());
        assert!(init_observability(LogFormat::Json).is_err());
    }
}
