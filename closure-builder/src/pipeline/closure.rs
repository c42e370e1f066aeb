//! The three-stage closure build pipeline.

use crate::cancellation::CancellationToken;
use crate::config::BuildConfiguration;
use crate::context::{BuilderContext, RunIdentity, StageContext};
use crate::core::{PipelineOutcome, StageId, StageStatus};
use crate::errors::{BuildError, BuildResult};
use crate::events::{
    EventSink, NoOpEventSink, PIPELINE_CANCELLED, PIPELINE_COMPLETED, PIPELINE_FAILED,
    PIPELINE_STARTED, STAGE_COMPLETED, STAGE_FAILED, STAGE_STARTED,
};
use crate::process::ProcessRunner;
use crate::stages::{default_stages, Stage};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Runs the AOT compile, entry rewrite and optimize stages in order.
///
/// Stages never overlap: each starts only after the previous one has
/// finished and its files are on disk. The first failure aborts the run and
/// leaves earlier artifacts in place.
pub struct ClosurePipeline {
    stages: Vec<Box<dyn Stage>>,
    runner: Arc<dyn ProcessRunner>,
    sink: Arc<dyn EventSink>,
}

impl ClosurePipeline {
    /// Creates the standard pipeline around a process runner.
    #[must_use]
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            stages: default_stages(),
            runner,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the stage ids in execution order.
    #[must_use]
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    /// Runs the pipeline to completion, first failure, or cancellation.
    ///
    /// Failures are reported to the host as a single `Error: <message>`
    /// status; the returned outcome carries no stage detail.
    pub async fn run(
        &self,
        config: &BuildConfiguration,
        host: &dyn BuilderContext,
        token: &CancellationToken,
    ) -> PipelineOutcome {
        let run = RunIdentity::new(config.project());
        let span = info_span!(
            "closure_build",
            run_id = %run.run_id,
            project = %run.project,
        );

        async {
            self.emit(&run, PIPELINE_STARTED, serde_json::json!({
                "stages": self.stages.iter().map(|s| s.id().as_str()).collect::<Vec<_>>(),
                "workspace_root": config.workspace_root().display().to_string(),
            }))
            .await;
            info!("Closure build started");

            match self.run_stages(config, host, token, &run).await {
                Ok(()) => {
                    info!(duration_ms = run.elapsed_ms(), "Closure build succeeded");
                    self.emit(&run, PIPELINE_COMPLETED, serde_json::json!({
                        "duration_ms": run.elapsed_ms(),
                    }))
                    .await;
                    PipelineOutcome::succeeded()
                }
                Err(err) => {
                    error!(error = %err, "Closure build failed");
                    host.report_status(&err.status_message());
                    let event_type = if err.is_cancellation() {
                        PIPELINE_CANCELLED
                    } else {
                        PIPELINE_FAILED
                    };
                    self.emit(&run, event_type, serde_json::json!({
                        "error": err.to_string(),
                        "duration_ms": run.elapsed_ms(),
                    }))
                    .await;
                    PipelineOutcome::failed()
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_stages(
        &self,
        config: &BuildConfiguration,
        host: &dyn BuilderContext,
        token: &CancellationToken,
        run: &RunIdentity,
    ) -> BuildResult<()> {
        for stage in &self.stages {
            if token.is_cancelled() {
                return Err(cancelled(token));
            }

            let id = stage.id();
            self.emit(run, STAGE_STARTED, serde_json::json!({
                "stage": id.as_str(),
                "status": StageStatus::Running,
            }))
            .await;
            info!(stage = %id, "Stage started");

            let started = Instant::now();
            let ctx = StageContext::new(config, host, &*self.runner, &*self.sink, run);
            let result = tokio::select! {
                biased;
                () = token.cancelled() => Err(cancelled(token)),
                result = stage.execute(&ctx) => result,
            };
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match result {
                Ok(output) => {
                    info!(stage = %id, duration_ms, "Stage completed");
                    self.emit(run, STAGE_COMPLETED, serde_json::json!({
                        "stage": id.as_str(),
                        "status": StageStatus::Ok,
                        "duration_ms": duration_ms,
                        "output_len": output.text.len(),
                    }))
                    .await;
                }
                Err(err) => {
                    let status = if err.is_cancellation() {
                        StageStatus::Cancel
                    } else {
                        StageStatus::Fail
                    };
                    error!(stage = %id, %status, error = %err, "Stage failed");
                    self.emit(run, STAGE_FAILED, serde_json::json!({
                        "stage": id.as_str(),
                        "status": status,
                        "duration_ms": duration_ms,
                        "error": err.to_string(),
                    }))
                    .await;
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    async fn emit(&self, run: &RunIdentity, event_type: &str, data: serde_json::Value) {
        self.sink.emit(event_type, Some(run.enrich(Some(data)))).await;
    }
}

impl std::fmt::Debug for ClosurePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosurePipeline")
            .field("stages", &self.stage_ids())
            .finish_non_exhaustive()
    }
}

fn cancelled(token: &CancellationToken) -> BuildError {
    BuildError::Cancelled(token.reason().unwrap_or_else(|| "cancelled".to_string()))
}
