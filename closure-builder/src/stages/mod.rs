//! The three build stages.
//!
//! Stages run strictly in order: the AOT compile must finish before the entry
//! module is rewritten, and the rewritten module must be on disk before the
//! optimizer starts.

mod aot;
mod entry;
mod optimize;

pub use aot::AotCompileStage;
pub use entry::EntryRewriteStage;
pub use optimize::OptimizeStage;

use crate::context::StageContext;
use crate::core::{StageId, StageResult};
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for build stages.
///
/// A stage either produces its output or fails with the error that aborts
/// the run.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns which stage this is.
    fn id(&self) -> StageId;

    /// Executes the stage.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The stage execution context
    async fn execute(&self, ctx: &StageContext<'_>) -> StageResult;
}

/// Returns the three stages in execution order.
#[must_use]
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(AotCompileStage),
        Box::new(EntryRewriteStage),
        Box::new(OptimizeStage),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stages_order() {
        let ids: Vec<StageId> = default_stages().iter().map(|s| s.id()).collect();
        assert_eq!(ids, StageId::ORDER.to_vec());
    }
}
