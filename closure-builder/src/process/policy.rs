//! Classification of external process output.

use super::ProcessOutput;

/// Decides whether a finished process counts as failed.
///
/// The AOT compiler and the optimizer are classified differently: the
/// compiler fails on any stderr output, the optimizer only when stderr
/// carries its error marker. `ExitStatus` looks only at the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Any non-empty stderr is a failure, whatever the exit code.
    AnyStderr,
    /// Stderr is a failure only if it contains the marker.
    StderrMarker(String),
    /// A non-zero or missing exit code is a failure.
    ExitStatus,
}

impl FailurePolicy {
    /// Checks a process output, returning the failure text if it failed.
    pub fn check(&self, output: &ProcessOutput) -> Result<(), String> {
        match self {
            Self::AnyStderr => {
                if output.stderr.is_empty() {
                    Ok(())
                } else {
                    Err(output.stderr.clone())
                }
            }
            Self::StderrMarker(marker) => {
                if output.stderr.contains(marker.as_str()) {
                    Err(output.stderr.clone())
                } else {
                    Ok(())
                }
            }
            Self::ExitStatus => {
                if output.success() {
                    Ok(())
                } else {
                    let code = output
                        .exit_code
                        .map_or_else(|| "signal".to_string(), |c| c.to_string());
                    Err(format!("exited with {code}: {}", output.stderr.trim_end()))
                }
            }
        }
    }
}
