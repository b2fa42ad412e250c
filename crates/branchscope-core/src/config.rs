use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScopeError;

/// Top-level configuration loaded from `.branchscope.toml`.
///
/// Every field has a built-in default, so a missing or empty file yields a
/// usable configuration.
///
/// # Examples
///
/// ```
/// use branchscope_core::ScopeConfig;
///
/// let config = ScopeConfig::default();
/// assert_eq!(config.log.level, "info");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl ScopeConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Io`] if the file cannot be read, or
    /// [`ScopeError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use branchscope_core::ScopeConfig;
    ///
    /// let config = ScopeConfig::from_file(Path::new(".branchscope.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, ScopeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use branchscope_core::ScopeConfig;
    ///
    /// let toml = r#"
    /// [log]
    /// level = "warn"
    /// "#;
    /// let config = ScopeConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.log.level, "warn");
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ScopeError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Logging configuration: the default level and the file used when logging
/// to a file is requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default tracing filter directive (overridden by `--debug-mode` and
    /// by `RUST_LOG`).
    #[serde(default = "default_level")]
    pub level: String,
    /// Target file for `--log-to-file`, opened in append mode.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_level() -> String {
    "info".into()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("branchscope.log")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_log_file(),
        }
    }
}
