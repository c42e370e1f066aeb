//! External process execution.
//!
//! This module provides:
//! - Command lines assembled by the stages
//! - The process runner trait and its tokio implementation
//! - Per-stage failure classification of captured output

mod command;
mod policy;
mod runner;

pub use command::CommandLine;
pub use policy::FailurePolicy;
pub use runner::{ProcessOutput, ProcessRunner, TokioProcessRunner};

#[cfg(test)]
pub use runner::MockProcessRunner;
