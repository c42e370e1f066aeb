//! Ordered literal substitutions applied to the entry module.

/// One global literal replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    /// Text to find.
    pub from: &'static str,
    /// Replacement text.
    pub to: &'static str,
}

impl Substitution {
    /// Replaces every occurrence of `from` in `source`.
    #[must_use]
    pub fn apply(&self, source: &str) -> String {
        source.replace(self.from, self.to)
    }
}

/// The substitutions, in the order they must run.
///
/// The order is part of the contract. Applying the table twice is not a
/// no-op (`bootstrapModuleFactory` contains `bootstrapModule`), so always
/// start from the unmodified entry module.
pub const ENTRY_SUBSTITUTIONS: [Substitution; 5] = [
    Substitution {
        from: "platformBrowserDynamic",
        to: "platformBrowser",
    },
    Substitution {
        from: "platform-browser-dynamic",
        to: "platform-browser",
    },
    Substitution {
        from: "bootstrapModule",
        to: "bootstrapModuleFactory",
    },
    Substitution {
        from: "AppModule",
        to: "AppModuleNgFactory",
    },
    Substitution {
        from: ".module",
        to: ".module.ngfactory",
    },
];

/// Rewrites a dynamic bootstrap entry module to boot the AOT factory.
#[must_use]
pub fn rewrite_entry_source(source: &str) -> String {
    ENTRY_SUBSTITUTIONS
        .iter()
        .fold(source.to_string(), |text, substitution| substitution.apply(&text))
}
