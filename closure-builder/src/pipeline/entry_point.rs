//! The host-facing entry point.

use super::ClosurePipeline;
use crate::cancellation::CancellationToken;
use crate::config::{BuildConfiguration, BuilderOptions};
use crate::context::BuilderContext;
use crate::core::PipelineOutcome;
use crate::events::LoggingEventSink;
use crate::process::TokioProcessRunner;
use std::sync::Arc;
use tracing::error;

/// Runs a closure build for the host.
///
/// Resolves the options against the host context, then runs the standard
/// pipeline with real subprocesses. An option error is reported to the host
/// the same way a stage failure is.
pub async fn execute_closure(
    options: &BuilderOptions,
    host: &dyn BuilderContext,
    token: &CancellationToken,
) -> PipelineOutcome {
    let config = match BuildConfiguration::from_options(options, host) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Could not resolve builder options");
            host.report_status(&err.status_message());
            return PipelineOutcome::failed();
        }
    };

    ClosurePipeline::new(Arc::new(TokioProcessRunner::new()))
        .with_event_sink(Arc::new(LoggingEventSink::default()))
        .run(&config, host, token)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{assert_outcome_failed, assert_status_contains, RecordingContext};

    #[tokio::test]
    async fn test_invalid_options_reported() {
        let host = RecordingContext::new("/ws");
        let options = BuilderOptions::new("", "closure.conf");

        let outcome = execute_closure(&options, &host, &CancellationToken::new()).await;

        assert_outcome_failed(outcome);
        assert_status_contains(&host, "Error: Invalid builder options");
    }

    #[tokio::test]
    async fn test_missing_compiler_binary_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let host = RecordingContext::new(dir.path());
        let options = BuilderOptions::new("tsconfig.json", "closure.conf");

        let outcome = execute_closure(&options, &host, &CancellationToken::new()).await;

        assert_outcome_failed(outcome);
        assert_status_contains(&host, "Error: Failed to run");
    }
}
