//! Error types for the closure build pipeline.
//!
//! Every stage failure collapses into a [`BuildError`]; the pipeline turns it
//! into the single status line the host sees.

use crate::rewrite::TranspileError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The main error type for closure build operations.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The builder options handed over by the host are unusable.
    #[error("Invalid builder options: {0}")]
    InvalidOptions(String),

    /// The AOT compiler configuration could not be loaded.
    #[error("Failed to load compiler configuration {}: {reason}", path.display())]
    CompilerConfig {
        /// Path of the configuration file.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// An external process could not be started or awaited.
    #[error("Failed to run {program}: {source}")]
    Process {
        /// The executable that failed.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An external process exceeded its configured time limit.
    #[error("{program} did not finish within {}s", timeout.as_secs())]
    Timeout {
        /// The executable that timed out.
        program: String,
        /// The limit that was exceeded.
        timeout: Duration,
    },

    /// The AOT compiler reported a failure.
    #[error("AOT compilation failed: {0}")]
    AotCompile(String),

    /// The whole-program optimizer reported a failure.
    #[error("Optimizer failed: {0}")]
    Optimizer(String),

    /// The entry module could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rewritten entry module could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rewritten entry module could not be transpiled.
    #[error("{0}")]
    Transpile(#[from] TranspileError),

    /// The run was cancelled before it finished.
    #[error("Build cancelled: {0}")]
    Cancelled(String),
}

impl BuildError {
    /// Creates a compiler configuration error.
    #[must_use]
    pub fn compiler_config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CompilerConfig {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from cancelling the run.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Formats the error as the status line reported to the host.
    #[must_use]
    pub fn status_message(&self) -> String {
        format!("Error: {self}")
    }
}

/// Result alias used across the crate.
pub type BuildResult<T> = Result<T, BuildError>;
