//! Command-line arguments and their mapping onto builder options.

use anyhow::{bail, Context, Result};
use clap::Parser;
use closure_builder::config::BuilderOptions;
use closure_builder::context::{HostContext, Target};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "closure-build")]
#[command(about = "AOT-compile, rewrite and closure-optimize an application bundle")]
#[command(version)]
pub struct Cli {
    /// Builder options as a JSON file (tsConfig, jarPath, closureConfig, ...)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Workspace root; external tools run here
    #[arg(long, default_value = ".")]
    pub workspace_root: PathBuf,

    /// Project being built; names the output directory under dist/
    #[arg(long)]
    pub project: Option<String>,

    /// Target name within the project
    #[arg(long)]
    pub target: Option<String>,

    /// Build configuration name
    #[arg(long)]
    pub configuration: Option<String>,

    /// AOT compiler configuration, relative to the workspace root
    #[arg(long)]
    pub ts_config: Option<PathBuf>,

    /// Optimizer jar
    #[arg(long)]
    pub jar_path: Option<PathBuf>,

    /// Optimizer flag file
    #[arg(long)]
    pub closure_config: Option<PathBuf>,

    /// Per-process time limit in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Classify both compiler processes by exit status instead of stderr
    #[arg(long)]
    pub exit_code_failures: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the options, letting flags override the options file.
    pub fn builder_options(&self) -> Result<BuilderOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading options file {}", path.display()))?;
                BuilderOptions::from_json(&json)
                    .with_context(|| format!("parsing options file {}", path.display()))?
            }
            None => {
                let (Some(ts_config), Some(closure_config)) = (&self.ts_config, &self.closure_config)
                else {
                    bail!("--ts-config and --closure-config are required without --options");
                };
                BuilderOptions::new(ts_config, closure_config)
            }
        };

        if let Some(ts_config) = &self.ts_config {
            options.ts_config.clone_from(ts_config);
        }
        if let Some(closure_config) = &self.closure_config {
            options.closure_config.clone_from(closure_config);
        }
        if let Some(jar_path) = &self.jar_path {
            options = options.with_jar_path(jar_path);
        }
        if let Some(secs) = self.timeout_secs {
            options = options.with_process_timeout_secs(secs);
        }
        if self.exit_code_failures {
            options = options.with_exit_code_classification(true);
        }
        Ok(options)
    }

    /// Builds the host context for the run.
    pub fn host_context(&self) -> HostContext {
        let host = HostContext::new(&self.workspace_root);
        match &self.project {
            Some(project) => {
                let mut target = Target::new(project);
                if let Some(name) = &self.target {
                    target = target.with_target(name);
                }
                if let Some(configuration) = &self.configuration {
                    target = target.with_configuration(configuration);
                }
                host.with_target(target)
            }
            None => host,
        }
    }
}
