//! Core domain model types for the closure build.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Stage identifiers and status enums
//! - Stage output and the per-stage result alias
//! - The terminal pipeline outcome

mod outcome;
mod output;
mod status;

pub use outcome::PipelineOutcome;
pub use output::{StageOutput, StageResult};
pub use status::{StageId, StageStatus};
