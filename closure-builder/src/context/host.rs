//! The host execution context.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// The build target a run was started for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// The logical project name; drives the optimizer output path.
    pub project: String,
    /// The target name within the project (e.g. `build`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// The named configuration, if any (e.g. `production`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

impl Target {
    /// Creates a target for a project.
    #[must_use]
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            target: None,
            configuration: None,
        }
    }

    /// Sets the target name.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the configuration name.
    #[must_use]
    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }
}

/// Capabilities the host gives a pipeline run.
///
/// Passed explicitly to every stage; read-mostly apart from status reports.
pub trait BuilderContext: Send + Sync {
    /// Reports a human-readable status line to the host.
    fn report_status(&self, status: &str);

    /// Returns the workspace root directory.
    fn workspace_root(&self) -> &Path;

    /// Returns the target being built, if the host knows it.
    fn target(&self) -> Option<&Target>;
}

/// A host context backed by plain values.
///
/// Status reports go to the log and the last one is kept for the caller.
#[derive(Debug)]
pub struct HostContext {
    workspace_root: PathBuf,
    target: Option<Target>,
    last_status: RwLock<Option<String>>,
}

impl HostContext {
    /// Creates a host context rooted at a workspace.
    #[must_use]
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            target: None,
            last_status: RwLock::new(None),
        }
    }

    /// Sets the build target.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    /// Returns the most recent status report.
    #[must_use]
    pub fn last_status(&self) -> Option<String> {
        self.last_status.read().clone()
    }
}

impl BuilderContext for HostContext {
    fn report_status(&self, status: &str) {
        info!(status = %status, "Builder status");
        *self.last_status.write() = Some(status.to_string());
    }

    fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }
}
