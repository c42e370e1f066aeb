//! The context handed to each stage.

use super::{BuilderContext, RunIdentity};
use crate::config::BuildConfiguration;
use crate::events::EventSink;
use crate::process::ProcessRunner;
use std::fmt;

/// Everything a stage may touch during one run.
///
/// Borrowed for the duration of a single stage; stages hold no state of
/// their own between runs.
#[derive(Clone, Copy)]
pub struct StageContext<'a> {
    config: &'a BuildConfiguration,
    host: &'a dyn BuilderContext,
    runner: &'a dyn ProcessRunner,
    sink: &'a dyn EventSink,
    run: &'a RunIdentity,
}

impl<'a> StageContext<'a> {
    /// Creates a new stage context.
    #[must_use]
    pub fn new(
        config: &'a BuildConfiguration,
        host: &'a dyn BuilderContext,
        runner: &'a dyn ProcessRunner,
        sink: &'a dyn EventSink,
        run: &'a RunIdentity,
    ) -> Self {
        Self {
            config,
            host,
            runner,
            sink,
            run,
        }
    }

    /// Returns the resolved build configuration.
    #[must_use]
    pub fn config(&self) -> &'a BuildConfiguration {
        self.config
    }

    /// Returns the host context.
    #[must_use]
    pub fn host(&self) -> &'a dyn BuilderContext {
        self.host
    }

    /// Returns the process runner.
    #[must_use]
    pub fn runner(&self) -> &'a dyn ProcessRunner {
        self.runner
    }

    /// Returns the run identity.
    #[must_use]
    pub fn run(&self) -> &'a RunIdentity {
        self.run
    }

    /// Emits an event enriched with the run identity, without waiting.
    pub fn try_emit_event(&self, event_type: &str, data: Option<serde_json::Value>) {
        self.sink.try_emit(event_type, Some(self.run.enrich(data)));
    }
}

impl fmt::Debug for StageContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageContext")
            .field("run_id", &self.run.run_id)
            .field("project", &self.run.project)
            .field("workspace_root", &self.config.workspace_root())
            .finish_non_exhaustive()
    }
}
