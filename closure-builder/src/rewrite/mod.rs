//! Entry-module rewriting.
//!
//! Turns a dynamically bootstrapped entry module into one that boots the
//! AOT-generated factory, then transpiles it to a flat ES module:
//! 1. Apply the ordered literal substitutions ([`rewrite_entry_source`])
//! 2. Transpile the result with oxc ([`transpile_module`])
//!
//! Both steps are pure; reading and writing files is the stage's job.

mod entry;
mod transpile;

pub use entry::{rewrite_entry_source, Substitution, ENTRY_SUBSTITUTIONS};
pub use transpile::{transpile_module, ModuleKind, TranspileError, TranspileOptions, MODULE_NAME};
