//! Builder configuration.
//!
//! This module provides:
//! - The options object handed over by the host
//! - The resolved, immutable per-run build configuration
//! - Access to the AOT compiler's `compilerOptions`

mod build;
mod options;
mod tsconfig;

pub use build::{
    BuildConfiguration, DEFAULT_JAR_PATH, DEFAULT_PROJECT, ENTRY_MODULE_PATH,
    INTERMEDIATE_OUTPUT_PATH, NGC_BINARY_PATH,
};
pub use options::BuilderOptions;
pub use tsconfig::{CompilerOptions, TsConfig};
