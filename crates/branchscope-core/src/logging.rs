//! One-shot tracing initialization.
//!
//! The binary calls [`init`] exactly once, before any builder runs, with an
//! explicit [`LogConfig`] value. None of the library code touches global
//! logger state beyond emitting `tracing` events.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::ScopeError;

/// Install the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` when set; otherwise from
/// `config.level`, forced to `debug` when `debug_mode` is on. With
/// `log_to_file` the output goes to `config.file` (append mode, no ANSI
/// colors) instead of stderr.
///
/// # Errors
///
/// Returns [`ScopeError::Config`] if the level directive is invalid or a
/// subscriber is already installed, and [`ScopeError::Io`] if the log file
/// cannot be opened.
pub fn init(config: &LogConfig, debug_mode: bool, log_to_file: bool) -> Result<(), ScopeError> {
    let level = if debug_mode { "debug" } else { &config.level };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| ScopeError::Config(format!("invalid log level '{level}': {e}")))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if log_to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.file)?;
        builder
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| ScopeError::Config(format!("failed to install subscriber: {e}")))?;
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| ScopeError::Config(format!("failed to install subscriber: {e}")))?;
    }

    Ok(())
}
