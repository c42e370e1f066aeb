//! # Closure Builder
//!
//! Builds a production bundle by running two external compilers in sequence
//! with an entry-module rewrite between them:
//!
//! 1. **AOT compile**: `ngc -p <tsConfig>`; any stderr fails the build
//! 2. **Entry rewrite**: `src/main.ts` is switched to the AOT factory and
//!    transpiled to `out-tsc/src/main.js`
//! 3. **Optimize**: the closure compiler jar writes `./dist/<project>/main.js`;
//!    only stderr containing `ERROR` fails the build
//!
//! The first failure stops the run and is reported to the host as a single
//! `Error: <message>` status. The result is a bare `{success}` outcome.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use closure_builder::prelude::*;
//!
//! let options = BuilderOptions::new("tsconfig.json", "closure.conf");
//! let host = HostContext::new("/path/to/workspace").with_target(Target::new("app"));
//! let outcome = execute_closure(&options, &host, &CancellationToken::new()).await;
//! assert!(outcome.success);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod pipeline;
pub mod process;
pub mod rewrite;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::CancellationToken;
    pub use crate::config::{BuildConfiguration, BuilderOptions, TsConfig};
    pub use crate::context::{BuilderContext, HostContext, RunIdentity, StageContext, Target};
    pub use crate::core::{PipelineOutcome, StageId, StageOutput, StageResult, StageStatus};
    pub use crate::errors::{BuildError, BuildResult};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::{execute_closure, ClosurePipeline};
    pub use crate::process::{CommandLine, FailurePolicy, ProcessOutput, ProcessRunner, TokioProcessRunner};
    pub use crate::rewrite::{rewrite_entry_source, transpile_module, TranspileOptions};
    pub use crate::stages::Stage;
}
