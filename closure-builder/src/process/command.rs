//! Command lines for external tools.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An executable plus arguments, run once by a [`ProcessRunner`].
///
/// [`ProcessRunner`]: super::ProcessRunner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The executable.
    pub program: String,
    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,
    /// Working directory for the process.
    pub cwd: Option<PathBuf>,
    /// Time limit for the process.
    pub timeout: Option<Duration>,
}

impl CommandLine {
    /// Creates a command line for an executable.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout: None,
        }
    }

    /// Creates a command line for an executable given as a path.
    #[must_use]
    pub fn for_path(program: &Path) -> Self {
        Self::new(program.to_string_lossy())
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a path argument.
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }

    /// Sets the working directory.
    #[must_use]
    pub fn current_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Sets the time limit.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
