//! Scripted collaborators for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::context::{BuilderContext, Target};
use crate::errors::BuildResult;
use crate::process::{CommandLine, ProcessOutput, ProcessRunner};

/// One recorded call to a [`ScriptedRunner`].
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The command that was run.
    pub command: CommandLine,
    /// Whether the watched path existed when the command started.
    pub watched_path_existed: bool,
}

/// A process runner that replays queued results.
///
/// Calls beyond the queue succeed with empty output.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<BuildResult<ProcessOutput>>>,
    invocations: Mutex<Vec<Invocation>>,
    watched_path: Option<PathBuf>,
    delay: Option<Duration>,
}

impl ScriptedRunner {
    /// Creates a runner with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful call with the given stdout and stderr.
    #[must_use]
    pub fn with_output(self, stdout: &str, stderr: &str) -> Self {
        self.with_result(Ok(ProcessOutput::success_with(stdout, stderr)))
    }

    /// Queues any result.
    #[must_use]
    pub fn with_result(self, result: BuildResult<ProcessOutput>) -> Self {
        self.responses.lock().push_back(result);
        self
    }

    /// Records whether `path` exists at every call.
    #[must_use]
    pub fn watching(mut self, path: impl Into<PathBuf>) -> Self {
        self.watched_path = Some(path.into());
        self
    }

    /// Makes every call take at least `delay`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns all recorded invocations.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }

    /// Returns the programs that were run, in order.
    #[must_use]
    pub fn programs(&self) -> Vec<String> {
        self.invocations
            .lock()
            .iter()
            .map(|i| i.command.program.clone())
            .collect()
    }

    /// Returns the number of calls.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.invocations.lock().len()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, command: &CommandLine) -> BuildResult<ProcessOutput> {
        let watched_path_existed = self.watched_path.as_deref().is_some_and(Path::exists);
        self.invocations.lock().push(Invocation {
            command: command.clone(),
            watched_path_existed,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.responses.lock().pop_front();
        next.unwrap_or_else(|| Ok(ProcessOutput::success_with("", "")))
    }
}

/// A host context that keeps every status report.
#[derive(Debug)]
pub struct RecordingContext {
    workspace_root: PathBuf,
    target: Option<Target>,
    statuses: Mutex<Vec<String>>,
}

impl RecordingContext {
    /// Creates a context rooted at a workspace.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            target: None,
            statuses: Mutex::new(Vec::new()),
        }
    }

    /// Sets the build target.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Returns every reported status, in order.
    #[must_use]
    pub fn statuses(&self) -> Vec<String> {
        self.statuses.lock().clone()
    }
}

impl BuilderContext for RecordingContext {
    fn report_status(&self, status: &str) {
        self.statuses.lock().push(status.to_string());
    }

    fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BuildError;

    #[tokio::test]
    async fn test_scripted_runner_replays_in_order() {
        let runner = ScriptedRunner::new()
            .with_output("first", "")
            .with_result(Err(BuildError::Optimizer("ERROR".to_string())));

        let first = runner.run(&CommandLine::new("ngc")).await.unwrap();
        assert_eq!(first.stdout, "first");
        assert!(runner.run(&CommandLine::new("java")).await.is_err());
        assert!(runner.run(&CommandLine::new("extra")).await.unwrap().success());

        assert_eq!(runner.programs(), vec!["ngc", "java", "extra"]);
    }

    #[tokio::test]
    async fn test_scripted_runner_watches_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let watched = dir.path().join("out.js");
        let runner = ScriptedRunner::new().watching(&watched);

        runner.run(&CommandLine::new("a")).await.unwrap();
        std::fs::write(&watched, "x").unwrap();
        runner.run(&CommandLine::new("b")).await.unwrap();

        let seen: Vec<bool> = runner
            .invocations()
            .iter()
            .map(|i| i.watched_path_existed)
            .collect();
        assert_eq!(seen, vec![false, true]);
    }

    #[test]
    fn test_recording_context_keeps_statuses() {
        let ctx = RecordingContext::new("/ws").with_target(Target::new("shop"));
        ctx.report_status("one");
        ctx.report_status("two");
        assert_eq!(ctx.statuses(), vec!["one", "two"]);
        assert_eq!(ctx.target().map(|t| t.project.as_str()), Some("shop"));
    }
}
