//! Testing utilities for closure builds.
//!
//! This module provides:
//! - A scripted process runner and a recording host context
//! - Assertions for pipeline outcomes and host status reports

mod assertions;
mod mocks;

pub use assertions::{assert_outcome_failed, assert_outcome_succeeded, assert_status_contains};
pub use mocks::{Invocation, RecordingContext, ScriptedRunner};
