//! The AOT compiler's configuration file.

use crate::errors::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The `compilerOptions` block of a tsconfig file.
///
/// Only `target` and `module` drive the transpile step; everything else is
/// kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// The language level to emit (e.g. `es2015`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// The module system to emit (e.g. `es2015`, `commonjs`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// All other compiler options.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

/// A parsed tsconfig file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    /// The compiler options.
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

impl TsConfig {
    /// Parses a tsconfig document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a tsconfig file.
    ///
    /// The file must be strict JSON. Comments and trailing commas, which the
    /// generated Angular CLI tsconfig may carry, are rejected with
    /// [`BuildError::CompilerConfig`].
    pub async fn load(path: &Path) -> BuildResult<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BuildError::compiler_config(path, e.to_string()))?;
        Self::from_json(&contents).map_err(|e| BuildError::compiler_config(path, e.to_string()))
    }
}
