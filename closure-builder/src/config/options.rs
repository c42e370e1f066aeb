//! Options object recognised by the builder.

use crate::errors::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The options the host passes to the builder.
///
/// Field names follow the host's camelCase schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderOptions {
    /// Path to the AOT compiler's configuration, relative to the workspace root.
    pub ts_config: PathBuf,

    /// Optional override for the optimizer jar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_path: Option<PathBuf>,

    /// Path to the optimizer's flag file.
    pub closure_config: PathBuf,

    /// Time limit for each external process, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_timeout_secs: Option<u64>,

    /// Classify both external processes by exit status instead of stderr.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub classify_by_exit_code: bool,
}

impl BuilderOptions {
    /// Creates options with the two required paths.
    #[must_use]
    pub fn new(ts_config: impl Into<PathBuf>, closure_config: impl Into<PathBuf>) -> Self {
        Self {
            ts_config: ts_config.into(),
            jar_path: None,
            closure_config: closure_config.into(),
            process_timeout_secs: None,
            classify_by_exit_code: false,
        }
    }

    /// Sets the optimizer jar path.
    #[must_use]
    pub fn with_jar_path(mut self, jar_path: impl Into<PathBuf>) -> Self {
        self.jar_path = Some(jar_path.into());
        self
    }

    /// Sets the per-process timeout.
    #[must_use]
    pub fn with_process_timeout_secs(mut self, secs: u64) -> Self {
        self.process_timeout_secs = Some(secs);
        self
    }

    /// Enables exit-status classification.
    #[must_use]
    pub fn with_exit_code_classification(mut self, enabled: bool) -> Self {
        self.classify_by_exit_code = enabled;
        self
    }

    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> BuildResult<Self> {
        serde_json::from_str(json).map_err(|e| BuildError::InvalidOptions(e.to_string()))
    }

    /// Checks that required paths are present and the timeout is usable.
    pub fn validate(&self) -> BuildResult<()> {
        if is_blank(&self.ts_config) {
            return Err(BuildError::InvalidOptions("tsConfig must not be empty".to_string()));
        }
        if is_blank(&self.closure_config) {
            return Err(BuildError::InvalidOptions(
                "closureConfig must not be empty".to_string(),
            ));
        }
        if self.jar_path.as_deref().is_some_and(is_blank) {
            return Err(BuildError::InvalidOptions(
                "jarPath must not be empty when given".to_string(),
            ));
        }
        if self.process_timeout_secs == Some(0) {
            return Err(BuildError::InvalidOptions(
                "processTimeoutSecs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
