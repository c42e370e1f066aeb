//! Terminal result of a pipeline run.

use serde::{Deserialize, Serialize};

/// The terminal value of a full run.
///
/// Deliberately binary: which stage failed is only visible in the status
/// message reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// Whether all three stages succeeded.
    pub success: bool,
}

impl PipelineOutcome {
    /// A successful run.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self { success: true }
    }

    /// A failed run.
    #[must_use]
    pub const fn failed() -> Self {
        Self { success: false }
    }
}

impl From<bool> for PipelineOutcome {
    fn from(success: bool) -> Self {
        Self { success }
    }
}
