use thiserror::Error;

/// Structural defects in the template text itself. Always an authoring
/// problem, never a data problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("block opened with [{keyword} ...] at byte {offset} has no matching [FIN]")]
    UnterminatedBlock { keyword: String, offset: usize },

    #[error("marker {marker:?} at byte {offset} opens a block inside another block; nesting is not supported")]
    NestedBlock { marker: String, offset: usize },

    #[error("[FIN] at byte {offset} closes nothing")]
    StrayFin { offset: usize },

    #[error("template declares more than one [{keyword}] block")]
    DuplicateBlock { keyword: String },

    #[error("condition section {section:?} contains no comparator")]
    MissingComparator { section: String },

    #[error("comparator {keyword:?} is recognized but not supported")]
    UnsupportedComparator { keyword: String },

    #[error("condition section {section:?} is missing its {side} operand")]
    MissingOperand {
        section: String,
        side: &'static str,
    },

    #[error("placeholder opened at byte {offset} is never closed")]
    UnterminatedPlaceholder { offset: usize },
}

/// Failures looking up a placeholder against the context. These mean the
/// template and the data disagree; the engine never papers over them with a
/// default or an "undefined" literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("unknown root object {name:?}")]
    UnknownRoot { name: String },

    #[error("path {path:?} has no field {field:?}")]
    UndefinedField { path: String, field: String },

    #[error("placeholder {path:?} resolved to a {kind} value, which has no text form")]
    Unrenderable { path: String, kind: &'static str },
}

/// Everything a render can fail with, as one tagged type so callers handle
/// all three classes uniformly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("no branch matched the supplied context")]
    NoBranchMatched,
}

pub type Result<T> = std::result::Result<T, TemplateError>;
