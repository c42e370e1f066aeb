//! Stage 1: ahead-of-time template compilation.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput, StageResult};
use crate::errors::BuildError;
use crate::process::CommandLine;
use async_trait::async_trait;
use tracing::{debug, info};

/// Runs `ngc -p <tsConfig>` from the workspace root.
///
/// Any stderr output fails the stage, regardless of exit code, unless the
/// run classifies by exit status.
#[derive(Debug, Clone, Copy, Default)]
pub struct AotCompileStage;

impl AotCompileStage {
    /// Builds the compiler invocation for a run.
    #[must_use]
    pub fn command(ctx: &StageContext<'_>) -> CommandLine {
        let config = ctx.config();
        CommandLine::for_path(config.ngc_binary())
            .arg("-p")
            .path_arg(config.ts_config())
            .current_dir(config.workspace_root())
            .timeout(config.process_timeout())
    }
}

#[async_trait]
impl Stage for AotCompileStage {
    fn id(&self) -> StageId {
        StageId::AotCompile
    }

    async fn execute(&self, ctx: &StageContext<'_>) -> StageResult {
        let command = Self::command(ctx);
        info!(command = %command, "Running AOT compiler");

        let output = ctx.runner().run(&command).await?;
        debug!(stdout_len = output.stdout.len(), exit_code = ?output.exit_code, "AOT compiler finished");

        ctx.config()
            .aot_policy()
            .check(&output)
            .map_err(BuildError::AotCompile)?;

        Ok(StageOutput::new(self.id(), output.stdout))
    }
}
