//! Execution contexts for a closure build.
//!
//! This module provides:
//! - The host execution context trait and a concrete host implementation
//! - A per-run identity used to correlate logs and events
//! - The stage context handed to each stage explicitly

mod execution;
mod host;
mod identity;

pub use execution::StageContext;
pub use host::{BuilderContext, HostContext, Target};
pub use identity::RunIdentity;
