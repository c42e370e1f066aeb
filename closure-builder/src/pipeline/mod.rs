//! Pipeline execution.
//!
//! This module provides:
//! - The three-stage closure pipeline with fail-fast sequencing
//! - The host entry point that resolves options and runs it

mod closure;
mod entry_point;

pub use closure::ClosurePipeline;
pub use entry_point::execute_closure;
