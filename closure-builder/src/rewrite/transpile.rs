//! oxc-based TypeScript to flat ES module transpilation.
//!
//! 1. Parse the rewritten entry module as TypeScript
//! 2. Build semantic scoping (required by the transformer)
//! 3. Strip types and lower syntax for the configured target
//! 4. Generate JavaScript

use crate::config::CompilerOptions;
use oxc::codegen::Codegen;
use oxc::parser::Parser;
use oxc::semantic::SemanticBuilder;
use oxc::span::SourceType;
use oxc::transformer::{TransformOptions, Transformer};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Logical name of the transpiled entry module.
pub const MODULE_NAME: &str = "app";

/// Errors from the transpile step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranspileError {
    /// The rewritten source does not parse.
    #[error("Transpile failed: parse errors:\n{0}")]
    Parse(String),

    /// The transformer rejected the program.
    #[error("Transpile failed: transform errors:\n{0}")]
    Transform(String),

    /// The configured target is below ES2015, which cannot be emitted.
    #[error("Transpile failed: target '{0}' is not supported, the lowest emitted target is es2015")]
    UnsupportedTarget(String),

    /// The configured module system is not a flat ES module.
    #[error("Transpile failed: module kind '{0}' is not supported, the optimizer expects ES modules")]
    UnsupportedModule(String),
}

/// The module system requested by `compilerOptions.module`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModuleKind {
    /// `es2015`, `es2020`, `es2022`, `esnext`, `preserve`, or unset.
    #[default]
    EsModule,
    /// `commonjs`.
    CommonJs,
    /// `amd`.
    Amd,
    /// `umd`.
    Umd,
    /// `system`.
    System,
    /// Anything else (e.g. `node16`).
    Other(String),
}

impl ModuleKind {
    /// Parses a `compilerOptions.module` value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "es6" | "es2015" | "es2020" | "es2022" | "esnext" | "preserve" => Self::EsModule,
            "commonjs" => Self::CommonJs,
            "amd" => Self::Amd,
            "umd" => Self::Umd,
            "system" => Self::System,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns true for ES module output.
    #[must_use]
    pub fn is_es_module(&self) -> bool {
        matches!(self, Self::EsModule)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EsModule => write!(f, "es2015"),
            Self::CommonJs => write!(f, "commonjs"),
            Self::Amd => write!(f, "amd"),
            Self::Umd => write!(f, "umd"),
            Self::System => write!(f, "system"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

/// Targets the transformer cannot lower to.
const UNSUPPORTED_TARGETS: [&str; 2] = ["es3", "es5"];

/// Options for [`transpile_module`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileOptions {
    /// Logical module name; also names the virtual source file.
    pub module_name: String,
    /// `compilerOptions.target`, if set.
    pub target: Option<String>,
    /// `compilerOptions.module`.
    pub module: ModuleKind,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            module_name: MODULE_NAME.to_string(),
            target: None,
            module: ModuleKind::EsModule,
        }
    }
}

impl TranspileOptions {
    /// Builds options from the AOT compiler's `compilerOptions`.
    #[must_use]
    pub fn from_compiler_options(options: &CompilerOptions) -> Self {
        Self {
            module_name: MODULE_NAME.to_string(),
            target: options.target.clone(),
            module: options
                .module
                .as_deref()
                .map(ModuleKind::parse)
                .unwrap_or_default(),
        }
    }

    fn file_name(&self) -> String {
        format!("{}.ts", self.module_name)
    }

    fn check_target(&self) -> Result<(), TranspileError> {
        match self.target.as_deref() {
            Some(target) if UNSUPPORTED_TARGETS.contains(&target.to_ascii_lowercase().as_str()) => {
                Err(TranspileError::UnsupportedTarget(target.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn transform_options(&self) -> TransformOptions {
        let Some(target) = self.target.as_deref() else {
            return TransformOptions::default();
        };
        TransformOptions::from_target(&target.to_ascii_lowercase()).unwrap_or_else(|reason| {
            warn!(target, %reason, "Unsupported transpile target, using default transform");
            TransformOptions::default()
        })
    }
}

/// Transpiles TypeScript source into a flat ES module.
pub fn transpile_module(source: &str, options: &TranspileOptions) -> Result<String, TranspileError> {
    if !options.module.is_es_module() {
        return Err(TranspileError::UnsupportedModule(options.module.to_string()));
    }
    options.check_target()?;

    let allocator = oxc_allocator::Allocator::default();
    let file_name = options.file_name();

    let parse_ret = Parser::new(&allocator, source, SourceType::ts()).parse();
    if parse_ret.panicked || !parse_ret.errors.is_empty() {
        return Err(TranspileError::Parse(join_diagnostics(&parse_ret.errors)));
    }

    let mut program = parse_ret.program;

    let sem_ret = SemanticBuilder::new()
        .with_excess_capacity(2.0)
        .build(&program);
    let scoping = sem_ret.semantic.into_scoping();

    let transform_options = options.transform_options();
    let transform_ret = Transformer::new(&allocator, Path::new(&file_name), &transform_options)
        .build_with_scoping(scoping, &mut program);
    if !transform_ret.errors.is_empty() {
        return Err(TranspileError::Transform(join_diagnostics(&transform_ret.errors)));
    }

    Ok(Codegen::new().build(&program).code)
}

fn join_diagnostics<E: fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIC_MAIN: &str = r"import { enableProdMode } from '@angular/core';
import { platformBrowser } from '@angular/platform-browser';
import { AppModuleNgFactory } from './app/app.module.ngfactory';
import { environment } from './environments/environment';

if (environment.production) {
  enableProdMode();
}

platformBrowser().bootstrapModuleFactory(AppModuleNgFactory)
  .catch((err: Error) => console.log(err));
";

    #[test]
    fn test_transpile_strips_types_keeps_imports() {
        let output = transpile_module(STATIC_MAIN, &TranspileOptions::default()).unwrap();

        assert!(!output.contains(": Error"), "got: {output}");
        assert!(output.contains("@angular/platform-browser"), "got: {output}");
        assert!(output.contains("./app/app.module.ngfactory"), "got: {output}");
        assert!(
            output.contains("bootstrapModuleFactory(AppModuleNgFactory)"),
            "got: {output}"
        );
        assert!(output.contains("import"), "got: {output}");
    }

    #[test]
    fn test_transpile_interface_removed() {
        let source = "interface Env { production: boolean }\nconst env: Env = { production: true };\nexport { env };\n";
        let output = transpile_module(source, &TranspileOptions::default()).unwrap();
        assert!(!output.contains("interface"), "got: {output}");
        assert!(output.contains("const env"), "got: {output}");
    }

    #[test]
    fn test_parse_error() {
        let err = transpile_module("const = ;", &TranspileOptions::default()).unwrap_err();
        assert!(matches!(err, TranspileError::Parse(_)), "got: {err:?}");
        assert!(err.to_string().starts_with("Transpile failed"));
    }

    #[test]
    fn test_commonjs_rejected() {
        let options = TranspileOptions {
            module: ModuleKind::CommonJs,
            ..TranspileOptions::default()
        };
        let err = transpile_module("const x = 1;", &options).unwrap_err();
        assert_eq!(err, TranspileError::UnsupportedModule("commonjs".to_string()));
    }

    #[test]
    fn test_es5_target_rejected() {
        for target in ["es5", "ES5", "es3"] {
            let options = TranspileOptions {
                target: Some(target.to_string()),
                ..TranspileOptions::default()
            };
            let err = transpile_module("const f = (e: Error) => console.log(e);", &options).unwrap_err();
            assert_eq!(err, TranspileError::UnsupportedTarget(target.to_string()));
            assert!(err.to_string().starts_with("Transpile failed"));
        }
    }

    #[test]
    fn test_es2015_target_accepted() {
        let options = TranspileOptions {
            target: Some("es2015".to_string()),
            ..TranspileOptions::default()
        };
        let output = transpile_module("const f = (e: Error) => console.log(e);", &options).unwrap();
        assert!(output.contains("const f"), "got: {output}");
    }

    #[test]
    fn test_unknown_target_falls_back() {
        let options = TranspileOptions {
            target: Some("not-a-real-target".to_string()),
            ..TranspileOptions::default()
        };
        let output = transpile_module("const x: number = 1;", &options).unwrap();
        assert!(output.contains("const x = 1"), "got: {output}");
    }

    #[test]
    fn test_module_kind_parse() {
        assert_eq!(ModuleKind::parse("ES2015"), ModuleKind::EsModule);
        assert_eq!(ModuleKind::parse("esnext"), ModuleKind::EsModule);
        assert_eq!(ModuleKind::parse("CommonJS"), ModuleKind::CommonJs);
        assert_eq!(ModuleKind::parse("system"), ModuleKind::System);
        assert_eq!(ModuleKind::parse("node16"), ModuleKind::Other("node16".to_string()));
    }

    #[test]
    fn test_options_from_compiler_options() {
        let compiler_options = CompilerOptions {
            target: Some("es2017".to_string()),
            module: Some("esnext".to_string()),
            other: serde_json::Map::new(),
        };
        let options = TranspileOptions::from_compiler_options(&compiler_options);
        assert_eq!(options.module_name, "app");
        assert_eq!(options.target.as_deref(), Some("es2017"));
        assert!(options.module.is_es_module());

        let unset = TranspileOptions::from_compiler_options(&CompilerOptions::default());
        assert_eq!(unset, TranspileOptions::default());
    }
}
