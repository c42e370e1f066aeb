//! Resolved per-run build configuration.

use super::BuilderOptions;
use crate::context::BuilderContext;
use crate::errors::BuildResult;
use crate::process::FailurePolicy;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Entry module location, relative to the workspace root.
pub const ENTRY_MODULE_PATH: &str = "src/main.ts";

/// Where the rewritten entry module is written, relative to the workspace root.
pub const INTERMEDIATE_OUTPUT_PATH: &str = "out-tsc/src/main.js";

/// The AOT compiler binary, relative to the workspace root.
pub const NGC_BINARY_PATH: &str = "node_modules/.bin/ngc";

/// Optimizer jar used when the options do not name one.
pub const DEFAULT_JAR_PATH: &str = "node_modules/google-closure-compiler-java/compiler.jar";

/// Project name used when the host has no target.
pub const DEFAULT_PROJECT: &str = "app";

/// Marker that makes optimizer stderr count as a failure.
const OPTIMIZER_ERROR_MARKER: &str = "ERROR";

/// Immutable input to one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    ts_config: PathBuf,
    workspace_root: PathBuf,
    entry_module: PathBuf,
    intermediate_output: PathBuf,
    ngc_binary: PathBuf,
    jar_path: Option<PathBuf>,
    closure_config: PathBuf,
    project: String,
    process_timeout: Option<Duration>,
    classify_by_exit_code: bool,
}

impl BuildConfiguration {
    /// Resolves host options against the host context.
    pub fn from_options(options: &BuilderOptions, host: &dyn BuilderContext) -> BuildResult<Self> {
        options.validate()?;

        let workspace_root = host.workspace_root().to_path_buf();
        let project = host
            .target()
            .map_or_else(|| DEFAULT_PROJECT.to_string(), |t| t.project.clone());

        Ok(Self {
            ts_config: options.ts_config.clone(),
            entry_module: workspace_root.join(ENTRY_MODULE_PATH),
            intermediate_output: workspace_root.join(INTERMEDIATE_OUTPUT_PATH),
            ngc_binary: workspace_root.join(NGC_BINARY_PATH),
            workspace_root,
            jar_path: options.jar_path.clone(),
            closure_config: options.closure_config.clone(),
            project,
            process_timeout: options.process_timeout_secs.map(Duration::from_secs),
            classify_by_exit_code: options.classify_by_exit_code,
        })
    }

    /// The AOT compiler configuration path, as given in the options.
    #[must_use]
    pub fn ts_config(&self) -> &Path {
        &self.ts_config
    }

    /// The AOT compiler configuration path resolved against the workspace root.
    #[must_use]
    pub fn ts_config_file(&self) -> PathBuf {
        self.workspace_root.join(&self.ts_config)
    }

    /// The workspace root; external processes run here.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// The bootstrap entry module source.
    #[must_use]
    pub fn entry_module(&self) -> &Path {
        &self.entry_module
    }

    /// The rewritten, transpiled entry module consumed by the optimizer.
    #[must_use]
    pub fn intermediate_output(&self) -> &Path {
        &self.intermediate_output
    }

    /// The AOT compiler executable.
    #[must_use]
    pub fn ngc_binary(&self) -> &Path {
        &self.ngc_binary
    }

    /// The optimizer jar, falling back to [`DEFAULT_JAR_PATH`].
    #[must_use]
    pub fn jar_path(&self) -> PathBuf {
        self.jar_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JAR_PATH))
    }

    /// The optimizer's flag file.
    #[must_use]
    pub fn closure_config(&self) -> &Path {
        &self.closure_config
    }

    /// The logical project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Where the optimizer writes the bundle.
    #[must_use]
    pub fn optimizer_output(&self) -> String {
        format!("./dist/{}/main.js", self.project)
    }

    /// The per-process time limit, if any.
    #[must_use]
    pub fn process_timeout(&self) -> Option<Duration> {
        self.process_timeout
    }

    /// How AOT compiler output is classified.
    #[must_use]
    pub fn aot_policy(&self) -> FailurePolicy {
        if self.classify_by_exit_code {
            FailurePolicy::ExitStatus
        } else {
            FailurePolicy::AnyStderr
        }
    }

    /// How optimizer output is classified.
    #[must_use]
    pub fn optimizer_policy(&self) -> FailurePolicy {
        if self.classify_by_exit_code {
            FailurePolicy::ExitStatus
        } else {
            FailurePolicy::StderrMarker(OPTIMIZER_ERROR_MARKER.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{HostContext, Target};

    fn options() -> BuilderOptions {
        BuilderOptions::new("tsconfig.app.json", "closure.conf")
    }

    #[test]
    fn test_paths_follow_workspace_conventions() {
        let host = HostContext::new("/ws");
        let config = BuildConfiguration::from_options(&options(), &host).unwrap();

        assert_eq!(config.entry_module(), Path::new("/ws/src/main.ts"));
        assert_eq!(config.intermediate_output(), Path::new("/ws/out-tsc/src/main.js"));
        assert_eq!(config.ngc_binary(), Path::new("/ws/node_modules/.bin/ngc"));
        assert_eq!(config.ts_config(), Path::new("tsconfig.app.json"));
        assert_eq!(config.ts_config_file(), PathBuf::from("/ws/tsconfig.app.json"));
    }

    #[test]
    fn test_default_jar_path() {
        let host = HostContext::new("/ws");
        let config = BuildConfiguration::from_options(&options(), &host).unwrap();
        assert_eq!(
            config.jar_path(),
            PathBuf::from("node_modules/google-closure-compiler-java/compiler.jar")
        );
    }

    #[test]
    fn test_explicit_jar_path() {
        let host = HostContext::new("/ws");
        let config =
            BuildConfiguration::from_options(&options().with_jar_path("/opt/cc.jar"), &host)
                .unwrap();
        assert_eq!(config.jar_path(), PathBuf::from("/opt/cc.jar"));
    }

    #[test]
    fn test_optimizer_output_uses_target_project() {
        let host = HostContext::new("/ws").with_target(Target::new("app"));
        let config = BuildConfiguration::from_options(&options(), &host).unwrap();
        assert_eq!(config.optimizer_output(), "./dist/app/main.js");

        let host = HostContext::new("/ws").with_target(Target::new("admin"));
        let config = BuildConfiguration::from_options(&options(), &host).unwrap();
        assert_eq!(config.optimizer_output(), "./dist/admin/main.js");
    }

    #[test]
    fn test_missing_target_defaults_to_app() {
        let host = HostContext::new("/ws");
        let config = BuildConfiguration::from_options(&options(), &host).unwrap();
        assert_eq!(config.project(), "app");
    }

    #[test]
    fn test_policies_default_to_asymmetric() {
        let host = HostContext::new("/ws");
        let config = BuildConfiguration::from_options(&options(), &host).unwrap();
        assert_eq!(config.aot_policy(), FailurePolicy::AnyStderr);
        assert_eq!(
            config.optimizer_policy(),
            FailurePolicy::StderrMarker("ERROR".to_string())
        );
    }

    #[test]
    fn test_policies_switch_to_exit_status() {
        let host = HostContext::new("/ws");
        let config = BuildConfiguration::from_options(
            &options().with_exit_code_classification(true),
            &host,
        )
        .unwrap();
        assert_eq!(config.aot_policy(), FailurePolicy::ExitStatus);
        assert_eq!(config.optimizer_policy(), FailurePolicy::ExitStatus);
    }

    #[test]
    fn test_invalid_options_rejected() {
        let host = HostContext::new("/ws");
        let err = BuildConfiguration::from_options(&BuilderOptions::new("", "c.conf"), &host)
            .unwrap_err();
        assert!(err.to_string().contains("tsConfig"), "got: {err}");
    }

    #[test]
    fn test_timeout_resolved() {
        let host = HostContext::new("/ws");
        let config = BuildConfiguration::from_options(
            &options().with_process_timeout_secs(120),
            &host,
        )
        .unwrap();
        assert_eq!(config.process_timeout(), Some(Duration::from_secs(120)));
    }
}
