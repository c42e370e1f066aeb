//! Test assertions for pipeline outcomes.

use super::RecordingContext;
use crate::core::PipelineOutcome;

/// Asserts that the build succeeded.
pub fn assert_outcome_succeeded(outcome: PipelineOutcome, ctx: &RecordingContext) {
    assert!(
        outcome.success,
        "Expected success, got failure. Statuses: {:?}",
        ctx.statuses()
    );
}

/// Asserts that the build failed.
pub fn assert_outcome_failed(outcome: PipelineOutcome) {
    assert!(!outcome.success, "Expected failure, got success");
}

/// Asserts that some reported status contains the given text.
pub fn assert_status_contains(ctx: &RecordingContext, needle: &str) {
    let statuses = ctx.statuses();
    assert!(
        statuses.iter().any(|s| s.contains(needle)),
        "Expected a status containing '{}', got {:?}",
        needle,
        statuses
    );
}
