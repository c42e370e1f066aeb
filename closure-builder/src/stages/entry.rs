//! Stage 2: rewrite the entry module to boot the AOT factory.

use super::Stage;
use crate::config::TsConfig;
use crate::context::StageContext;
use crate::core::{StageId, StageOutput, StageResult};
use crate::errors::BuildError;
use crate::rewrite::{rewrite_entry_source, transpile_module, TranspileOptions};
use async_trait::async_trait;
use tracing::{debug, info};

/// Reads `src/main.ts`, applies the entry substitutions, transpiles the
/// result and writes it to `out-tsc/src/main.js`.
///
/// The output file is written in full before the stage returns. The source
/// file is never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryRewriteStage;

#[async_trait]
impl Stage for EntryRewriteStage {
    fn id(&self) -> StageId {
        StageId::EntryRewrite
    }

    async fn execute(&self, ctx: &StageContext<'_>) -> StageResult {
        let config = ctx.config();

        let ts_config = TsConfig::load(&config.ts_config_file()).await?;

        let entry = config.entry_module();
        let source = tokio::fs::read_to_string(entry)
            .await
            .map_err(|source| BuildError::Read {
                path: entry.to_path_buf(),
                source,
            })?;

        let rewritten = rewrite_entry_source(&source);
        debug!(entry = %entry.display(), "Entry module rewritten");

        let options = TranspileOptions::from_compiler_options(&ts_config.compiler_options);
        let transpiled = transpile_module(&rewritten, &options)?;

        let output = config.intermediate_output();
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| BuildError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(output, &transpiled)
            .await
            .map_err(|source| BuildError::Write {
                path: output.to_path_buf(),
                source,
            })?;

        info!(output = %output.display(), bytes = transpiled.len(), "Wrote rewritten entry module");
        Ok(StageOutput::new(self.id(), transpiled))
    }
}
