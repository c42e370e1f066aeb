//! Stage output type.

use super::StageId;
use crate::errors::BuildError;

/// The captured output of a successful stage.
///
/// Produced by a stage and consumed right away by the pipeline; nothing keeps
/// it once the next stage starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    /// The stage that produced the output.
    pub stage: StageId,
    /// Captured text: process stdout, or the transpiled entry module.
    pub text: String,
}

impl StageOutput {
    /// Creates a stage output.
    #[must_use]
    pub fn new(stage: StageId, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
        }
    }

    /// Returns true if the stage produced no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Either the captured output of a stage or the error that stopped it.
pub type StageResult = Result<StageOutput, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_output_text() {
        let output = StageOutput::new(StageId::AotCompile, "compiled 12 files");
        assert_eq!(output.stage, StageId::AotCompile);
        assert!(!output.is_empty());
        assert!(StageOutput::new(StageId::Optimize, "").is_empty());
    }
}
