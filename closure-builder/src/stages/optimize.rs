//! Stage 3: whole-program optimization.

use super::Stage;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput, StageResult};
use crate::errors::BuildError;
use crate::events::STAGE_WARNING;
use crate::process::CommandLine;
use async_trait::async_trait;
use tracing::{info, warn};

/// Runs `java -jar <jar> --flagfile <closureConfig> --js_output_file ./dist/<project>/main.js`.
///
/// Stderr without the `ERROR` marker is treated as warnings and logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizeStage;

impl OptimizeStage {
    /// Builds the optimizer invocation for a run.
    #[must_use]
    pub fn command(ctx: &StageContext<'_>) -> CommandLine {
        let config = ctx.config();
        CommandLine::new("java")
            .arg("-jar")
            .path_arg(&config.jar_path())
            .arg("--flagfile")
            .path_arg(config.closure_config())
            .arg("--js_output_file")
            .arg(config.optimizer_output())
            .current_dir(config.workspace_root())
            .timeout(config.process_timeout())
    }
}

#[async_trait]
impl Stage for OptimizeStage {
    fn id(&self) -> StageId {
        StageId::Optimize
    }

    async fn execute(&self, ctx: &StageContext<'_>) -> StageResult {
        let command = Self::command(ctx);
        info!(command = %command, "Running optimizer");

        let output = ctx.runner().run(&command).await?;

        ctx.config()
            .optimizer_policy()
            .check(&output)
            .map_err(BuildError::Optimizer)?;

        if !output.stderr.is_empty() {
            warn!(stderr = %output.stderr.trim_end(), "Optimizer reported warnings");
            ctx.try_emit_event(
                STAGE_WARNING,
                Some(serde_json::json!({
                    "stage": self.id().as_str(),
                    "stderr": output.stderr,
                })),
            );
        }

        Ok(StageOutput::new(self.id(), output.stdout))
    }
}
