//! Event sink system for observability.
//!
//! The pipeline emits one event per stage transition plus a terminal
//! pipeline event. Every payload carries the run id and project.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Emitted once before the first stage.
pub const PIPELINE_STARTED: &str = "pipeline.started";
/// Emitted after all three stages succeeded.
pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
/// Emitted when a stage failed and the run was aborted.
pub const PIPELINE_FAILED: &str = "pipeline.failed";
/// Emitted when the run was cancelled.
pub const PIPELINE_CANCELLED: &str = "pipeline.cancelled";
/// Emitted when a stage starts.
pub const STAGE_STARTED: &str = "stage.started";
/// Emitted when a stage succeeds.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// Emitted when a stage fails.
pub const STAGE_FAILED: &str = "stage.failed";
/// Emitted when a stage succeeded but its tool wrote to stderr.
pub const STAGE_WARNING: &str = "stage.warning";
