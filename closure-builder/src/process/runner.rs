//! Process runner trait and the tokio-backed implementation.

use super::CommandLine;
use crate::errors::{BuildError, BuildResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl ProcessOutput {
    /// Creates an output with exit code zero.
    #[must_use]
    pub fn success_with(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the process exited with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<std::process::Output> for ProcessOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs one external executable to completion.
///
/// A single invocation, no retries. Classification of the captured output is
/// left to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs the command and captures its output.
    async fn run(&self, command: &CommandLine) -> BuildResult<ProcessOutput>;
}

/// Runs processes with `tokio::process`.
///
/// Children are killed when the run future is dropped, so a timed-out or
/// cancelled stage does not leave its process behind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    /// Creates a new runner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &CommandLine) -> BuildResult<ProcessOutput> {
        debug!(command = %command, cwd = ?command.cwd, "Spawning process");

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &command.cwd {
            cmd.current_dir(cwd);
        }

        let process_error = |source| BuildError::Process {
            program: command.program.clone(),
            source,
        };

        let child = cmd.spawn().map_err(process_error)?;
        let wait = child.wait_with_output();

        let output = match command.timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| BuildError::Timeout {
                    program: command.program.clone(),
                    timeout: limit,
                })?,
            None => wait.await,
        }
        .map_err(process_error)?;

        let output = ProcessOutput::from(output);
        debug!(
            command = %command,
            exit_code = ?output.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Process finished"
        );
        Ok(output)
    }
}
