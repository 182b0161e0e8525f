use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for tandem-codegen operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("type '{symbol}' is defined in more than one file")]
    #[diagnostic(
        code(tandem::ambiguous_symbol),
        help("'{symbol}' is declared in both '{first}' and '{second}'; assign it to exactly one output file")
    )]
    AmbiguousSymbol {
        symbol: String,
        first: String,
        second: String,
    },

    #[error("reference to '{symbol}' cannot be resolved")]
    #[diagnostic(
        code(tandem::unresolved_reference),
        help("no defining file and no external mapping is known for '{symbol}'")
    )]
    UnresolvedReference { symbol: String },

    #[error("type '{name}' is declared both as {existing} and as {requested}")]
    #[diagnostic(
        code(tandem::conflicting_declaration),
        help("two generator modules disagree on the kind of '{name}'; declarations merge only when the kinds match")
    )]
    ConflictingDeclaration {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("unbalanced {construct}: {detail}")]
    #[diagnostic(code(tandem::structural_imbalance))]
    StructuralImbalance {
        construct: &'static str,
        detail: String,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(tandem::materialization_failure))]
    Materialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist manifest '{path}'")]
    #[diagnostic(code(tandem::manifest_persist))]
    ManifestPersist {
        path: PathBuf,
        detail: String,
    },
}

impl Error {
    /// Create an ambiguous symbol error.
    pub fn ambiguous(
        symbol: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Box<Self> {
        Box::new(Error::AmbiguousSymbol {
            symbol: symbol.into(),
            first: first.into(),
            second: second.into(),
        })
    }

    /// Create an unresolved reference error (strict mode only).
    pub fn unresolved(symbol: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnresolvedReference {
            symbol: symbol.into(),
        })
    }

    /// Create a conflicting declaration error.
    pub fn conflicting(
        name: impl Into<String>,
        existing: &'static str,
        requested: &'static str,
    ) -> Box<Self> {
        Box::new(Error::ConflictingDeclaration {
            name: name.into(),
            existing,
            requested,
        })
    }

    /// Create a structural imbalance error.
    pub fn imbalance(construct: &'static str, detail: impl Into<String>) -> Box<Self> {
        Box::new(Error::StructuralImbalance {
            construct,
            detail: detail.into(),
        })
    }

    /// Create a materialization error.
    pub fn materialization(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Materialization {
            path: path.into(),
            source,
        })
    }
}
